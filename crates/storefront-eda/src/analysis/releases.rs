//! Number of releases per year.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{chart_files, chart_path, chart_size};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::plotting::{self, ChartText};
use crate::types::YearCount;

/// Count records per release year, sorted by year. Missing years are skipped.
pub fn compute(years: &[Option<i32>]) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in years.iter().flatten() {
        *counts.entry(*year).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Filled step chart of the yearly counts.
pub fn render(counts: &[YearCount], config: &AnalysisConfig) -> Result<PathBuf> {
    let path = chart_path(config, chart_files::RELEASES_BY_YEAR);
    let points: Vec<(f64, f64)> = counts
        .iter()
        .map(|c| (f64::from(c.year), c.count as f64))
        .collect();

    plotting::step_area_chart(
        &points,
        ChartText::new(
            "Release years of GOG.com games",
            "Release year",
            "Number of games",
        ),
        config.max_year_ticks,
        &path,
        chart_size(config),
    )?;
    Ok(path)
}
