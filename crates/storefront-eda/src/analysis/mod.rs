//! Analysis stage: seven exploratory analyses over the cleaned catalog.
//!
//! Each analysis module exposes a pure `compute` step over the columns of a
//! [`GameTable`] and a `render` step that writes its chart. The [`Analyzer`]
//! runs them in order and bundles the results into an [`AnalysisReport`].

pub mod discount;
pub mod genre;
pub mod popularity;
pub mod price;
pub mod releases;

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::io;
use crate::types::{AnalysisReport, columns};
use crate::utils::{column_as_bool, column_as_f64, column_as_string};

/// Chart file names, one per rendered analysis.
pub mod chart_files {
    pub const PRICE_DISTRIBUTION: &str = "price_distribution.png";
    pub const GENRE_DISTRIBUTION: &str = "genre_distribution.png";
    pub const RELEASES_BY_YEAR: &str = "releases_by_year.png";
    pub const PRICE_VS_POPULARITY: &str = "price_vs_popularity.png";
    pub const GENRE_POPULARITY: &str = "genre_popularity.png";
    pub const YEAR_VS_POPULARITY: &str = "year_vs_popularity.png";
}

/// Typed, column-oriented view of the cleaned table.
///
/// Missing or unparseable cells are `None`; each analysis skips them for the
/// columns it reads. Empty genre labels count as missing.
#[derive(Debug, Clone, Default)]
pub struct GameTable {
    pub titles: Vec<Option<String>>,
    pub final_amount: Vec<Option<f64>>,
    pub review_count: Vec<Option<f64>>,
    pub main_genre: Vec<Option<String>>,
    pub is_discounted: Vec<Option<bool>>,
    pub release_year: Vec<Option<i32>>,
    shape: (usize, usize),
    source: Option<String>,
}

impl GameTable {
    /// Extract the analysed columns from a cleaned frame.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let main_genre = column_as_string(df, columns::MAIN_GENRE)?
            .into_iter()
            .map(|genre| genre.filter(|g| !g.trim().is_empty()))
            .collect();
        let release_year = column_as_f64(df, columns::RELEASE_YEAR)?
            .into_iter()
            .map(|year| year.map(|y| y.trunc() as i32))
            .collect();

        Ok(Self {
            titles: column_as_string(df, columns::TITLE)?,
            final_amount: column_as_f64(df, columns::FINAL_AMOUNT)?,
            review_count: column_as_f64(df, columns::REVIEW_COUNT)?,
            main_genre,
            is_discounted: column_as_bool(df, columns::IS_DISCOUNTED)?,
            release_year,
            shape: df.shape(),
            source: None,
        })
    }

    /// Load the cleaned CSV table from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let df = io::load_csv(path)?;
        let mut table = Self::from_frame(&df)?;
        table.source = Some(path.display().to_string());
        Ok(table)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Shape (rows, columns) of the frame the table was extracted from.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Path the table was loaded from, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Runs the analyses and renders their charts.
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Execute all seven analyses in order.
    ///
    /// The table is only read. When chart rendering is enabled the charts
    /// directory is created and every chart path is listed in the report.
    pub fn run(&self, table: &GameTable) -> Result<AnalysisReport> {
        self.config.validate()?;
        info!("Analyzing {} records...", table.len());
        let config = &self.config;

        let price_distribution = price::compute(
            &table.final_amount,
            config.price_bin_width,
            config.price_upper_bound,
        );
        let genre_distribution =
            genre::distribution(&table.main_genre, config.top_genres, &config.other_label);
        let releases_by_year = releases::compute(&table.release_year);
        let price_vs_popularity = popularity::price_vs_popularity(
            &table.titles,
            &table.final_amount,
            &table.review_count,
            config.review_outlier_threshold,
        )?;
        let discount_effect = discount::compute(&table.is_discounted, &table.review_count)?;
        let genre_popularity = genre::popularity(&table.main_genre, &table.review_count);
        let year_vs_popularity =
            popularity::year_vs_popularity(&table.release_year, &table.review_count)?;

        let mut charts = Vec::new();
        if config.render_charts {
            fs::create_dir_all(&config.charts_dir)?;
            info!("Rendering charts to {}", config.charts_dir.display());

            charts.push(price::render(&price_distribution, config)?);
            if genre_distribution.total > 0 {
                charts.push(genre::render_distribution(&genre_distribution, config)?);
            } else {
                warn!("No genre labels present, skipping genre distribution chart");
            }
            if !releases_by_year.is_empty() {
                charts.push(releases::render(&releases_by_year, config)?);
            }
            charts.push(popularity::render_price_vs_popularity(
                &table.final_amount,
                &table.review_count,
                &price_vs_popularity,
                config,
            )?);
            if !genre_popularity.is_empty() {
                charts.push(genre::render_popularity(&genre_popularity, config)?);
            }
            charts.push(popularity::render_year_vs_popularity(
                &table.release_year,
                &table.review_count,
                config,
            )?);
        }

        info!("Analysis complete");

        Ok(AnalysisReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            input_file: table.source().unwrap_or_default().to_string(),
            shape: table.shape(),
            price_distribution,
            genre_distribution,
            releases_by_year,
            price_vs_popularity,
            discount_effect,
            genre_popularity,
            year_vs_popularity,
            charts: charts
                .into_iter()
                .map(|path| path.display().to_string())
                .collect(),
        })
    }
}

/// Path of a chart file inside the configured charts directory.
pub(crate) fn chart_path(config: &AnalysisConfig, file_name: &str) -> PathBuf {
    config.charts_dir.join(file_name)
}

/// Default chart size from the configuration.
pub(crate) fn chart_size(config: &AnalysisConfig) -> (u32, u32) {
    (config.chart_width, config.chart_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cleaned_frame() -> DataFrame {
        df![
            "title" => ["A", "B", "C", "D", "E", "F"],
            "finalAmount" => [0.0, 4.99, 9.99, 19.99, 29.99, 55.0],
            "reviewCount" => [10i64, 40, 25, 300, 2500, 5],
            "main_genre" => [Some("Action"), Some("RPG"), Some(""), Some("Action"), Some("Strategy"), None],
            "isDiscounted" => [false, true, false, true, false, true],
            "release_year" => [2010i32, 2012, 2012, 2015, 2018, 2020],
        ]
        .unwrap()
    }

    #[test]
    fn test_from_frame_treats_empty_genre_as_missing() {
        let table = GameTable::from_frame(&cleaned_frame()).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.main_genre[2], None);
        assert_eq!(table.main_genre[5], None);
        assert_eq!(table.release_year[0], Some(2010));
        assert_eq!(table.is_discounted[1], Some(true));
        assert_eq!(table.shape(), (6, 6));
    }

    #[test]
    fn test_run_without_charts() {
        let table = GameTable::from_frame(&cleaned_frame()).unwrap();
        let config = AnalysisConfig::builder()
            .render_charts(false)
            .build()
            .unwrap();
        let report = Analyzer::new(config).run(&table).unwrap();

        assert!(report.charts.is_empty());
        assert_eq!(report.shape, (6, 6));
        assert_eq!(report.price_distribution.bins.len(), 26);
        assert_eq!(report.price_distribution.out_of_range, 1);
        assert_eq!(report.genre_distribution.total, 4);
        assert_eq!(report.releases_by_year.len(), 5);
        assert_eq!(report.price_vs_popularity.outliers.len(), 1);
        assert_eq!(report.discount_effect.groups.len(), 2);
        assert_eq!(report.genre_popularity[0].genre, "Strategy");
        assert_eq!(report.year_vs_popularity.points, 6);
    }

    #[test]
    fn test_run_fails_without_both_discount_groups() {
        let mut table = GameTable::from_frame(&cleaned_frame()).unwrap();
        table.is_discounted = vec![Some(false); table.len()];
        let config = AnalysisConfig::builder()
            .render_charts(false)
            .build()
            .unwrap();
        let err = Analyzer::new(config).run(&table).unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let table = GameTable::from_frame(&cleaned_frame()).unwrap();
        let config = AnalysisConfig {
            top_genres: 0,
            render_charts: false,
            ..AnalysisConfig::default()
        };
        let err = Analyzer::new(config).run(&table).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
