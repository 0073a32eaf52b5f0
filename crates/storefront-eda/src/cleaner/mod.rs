//! Cleaning stage: raw catalog export to analysis-ready table.
//!
//! This module provides functionality for:
//! - Keeping only rows that describe actual games
//! - Projecting the fixed record column set
//! - Deriving `main_genre` and `release_year`
//! - Dropping unreviewed and incomplete rows

mod derive;
mod filters;

pub use derive::{main_genre, release_year};

use polars::prelude::*;
use tracing::{debug, info};

use crate::config::CleanerConfig;
use crate::error::{EdaError, Result, ResultExt};
use crate::io;
use crate::types::{CleaningSummary, columns};

/// Data cleaner for the storefront catalog.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean a raw catalog frame.
    ///
    /// Steps, in order:
    /// 1. Keep rows where `isGame` is true
    /// 2. Project the record columns
    /// 3. Derive `main_genre` and `release_year`
    /// 4. Drop rows with `reviewCount <= 0`
    /// 5. Drop rows missing `overallAvgRating`, `finalAmount` or `release_year`
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningSummary)> {
        let mut summary = CleaningSummary {
            rows_read: df.height(),
            ..CleaningSummary::default()
        };

        info!("Performing catalog cleaning...");
        Self::check_columns(&df)?;

        // 1. Games only
        let (games, dropped) = filters::apply(&df, &filters::game_mask(&df)?)?;
        summary.non_game_rows = dropped;
        debug!("Removed {} non-game rows", dropped);

        // 2. Fixed column set
        let mut df = games
            .select(columns::RECORD_COLUMNS)
            .context("Selecting record columns")?;

        // 3. Derived columns
        let main_genre = derive::derive_main_genre(df.column(columns::GENRES)?.as_materialized_series())?;
        let release_year = derive::derive_release_year(
            df.column(columns::GLOBAL_RELEASE_DATE)?.as_materialized_series(),
        )?;
        df.with_column(main_genre)?;
        df.with_column(release_year)?;

        // 4. Reviewed titles only
        let (df, dropped) = filters::apply(&df, &filters::reviewed_mask(&df)?)?;
        summary.unreviewed_rows = dropped;
        debug!("Removed {} rows without reviews", dropped);

        // 5. Complete rows only
        let mask = filters::complete_mask(&df, &columns::REQUIRED_NON_NULL)?;
        let (df, dropped) = filters::apply(&df, &mask)?;
        summary.incomplete_rows = dropped;
        debug!("Removed {} incomplete rows", dropped);

        summary.rows_kept = df.height();
        summary.columns_kept = df.width();

        info!(
            "Cleaning complete: {} -> {} rows ({} dropped)",
            summary.rows_read,
            summary.rows_kept,
            summary.rows_dropped()
        );

        Ok((df, summary))
    }

    /// Load the raw export, clean it and write the cleaned table.
    ///
    /// Nothing is written unless every cleaning step succeeded.
    pub fn run(&self, config: &CleanerConfig) -> Result<(DataFrame, CleaningSummary)> {
        config.validate()?;
        let raw = io::load_csv(&config.input_path)?;
        let (mut cleaned, summary) = self.clean(raw)?;
        io::write_csv(&mut cleaned, &config.output_path)?;
        Ok((cleaned, summary))
    }

    fn check_columns(df: &DataFrame) -> Result<()> {
        let present = df.get_column_names();
        for required in columns::RECORD_COLUMNS {
            if !present.iter().any(|name| name.as_str() == required) {
                return Err(EdaError::ColumnNotFound(required.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{column_as_bool, column_as_f64};
    use pretty_assertions::assert_eq;

    fn raw_frame() -> DataFrame {
        df![
            "id" => [1i64, 2, 3, 4, 5],
            "title" => ["Alpha", "Soundtrack", "Gamma", "Delta", "Epsilon"],
            "developer" => [Some("Studio A"), Some("Studio B"), None, Some("Studio D"), Some("Studio E")],
            "publisher" => ["Pub A", "Pub B", "Pub C", "Pub D", "Pub E"],
            "genres" => ["['Action', 'Shooter']", "['Music']", "['RPG']", "[Strategy]", "['Puzzle']"],
            "category" => ["game", "dlc", "game", "game", "game"],
            "overallAvgRating" => [Some(4.5), Some(4.0), Some(3.0), None, Some(3.5)],
            "reviewCount" => [120i64, 40, 0, 15, 8],
            "finalAmount" => [9.99, 2.99, 4.99, 19.99, 0.0],
            "baseAmount" => [19.99, 2.99, 4.99, 19.99, 0.0],
            "discountPercentage" => [50.0, 0.0, 0.0, 0.0, 0.0],
            "isDiscounted" => [true, false, false, false, false],
            "isFree" => [false, false, false, false, true],
            "globalReleaseDate" => [1_431_993_600i64, 1_431_993_600, 0, 946_684_800, -100],
            "isGame" => [true, false, true, true, true],
            "coverImage" => ["a.png", "b.png", "c.png", "d.png", "e.png"],
        ]
        .unwrap()
    }

    #[test]
    fn test_clean_applies_every_filter() {
        let (df, summary) = DataCleaner.clean(raw_frame()).unwrap();

        // Alpha survives; Soundtrack is not a game, Gamma has no reviews,
        // Delta has no rating and Epsilon has a negative release date.
        assert_eq!(df.height(), 1);
        assert_eq!(summary.rows_read, 5);
        assert_eq!(summary.non_game_rows, 1);
        assert_eq!(summary.unreviewed_rows, 1);
        assert_eq!(summary.incomplete_rows, 2);
        assert_eq!(summary.rows_kept, 1);
    }

    #[test]
    fn test_clean_projects_fixed_columns_and_derivations() {
        let (df, summary) = DataCleaner.clean(raw_frame()).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let mut expected: Vec<String> = columns::RECORD_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .collect();
        expected.push("main_genre".to_string());
        expected.push("release_year".to_string());

        assert_eq!(names, expected);
        assert_eq!(summary.columns_kept, 16);

        let genre = df.column("main_genre").unwrap().str().unwrap().get(0);
        assert_eq!(genre, Some("Action"));
        let year = df.column("release_year").unwrap().i32().unwrap().get(0);
        assert_eq!(year, Some(2015));
    }

    #[test]
    fn test_clean_output_invariants() {
        let (df, _) = DataCleaner.clean(raw_frame()).unwrap();

        assert!(column_as_bool(&df, "isGame").unwrap().iter().all(|v| *v == Some(true)));
        assert!(
            column_as_f64(&df, "reviewCount")
                .unwrap()
                .iter()
                .all(|v| v.is_some_and(|c| c > 0.0))
        );
        for name in columns::REQUIRED_NON_NULL {
            assert!(column_as_f64(&df, name).unwrap().iter().all(Option::is_some));
        }
    }

    #[test]
    fn test_clean_missing_column_fails() {
        let df = raw_frame().drop("genres").unwrap();
        let err = DataCleaner.clean(df).unwrap_err();
        assert!(matches!(err, EdaError::ColumnNotFound(name) if name == "genres"));
    }

    #[test]
    fn test_clean_empty_frame_after_game_filter() {
        let df = raw_frame();
        let mask: BooleanChunked = vec![false, true, false, false, false].into_iter().collect();
        let only_soundtrack = df.filter(&mask).unwrap();

        let (cleaned, summary) = DataCleaner.clean(only_soundtrack).unwrap();
        assert_eq!(cleaned.height(), 0);
        assert_eq!(summary.non_game_rows, 1);
    }
}
