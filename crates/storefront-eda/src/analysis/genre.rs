//! Genre distribution and popularity by genre.

use std::collections::HashMap;
use std::path::PathBuf;

use super::{chart_files, chart_path, chart_size};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::plotting::{self, ChartText};
use crate::stats;
use crate::types::{CategoryCount, GenreDistribution, GenreReviews};

/// Count records per genre, keep the `top_n` most frequent and sum the rest
/// into a single bucket labelled `other_label`.
///
/// Ordering is by count descending, ties broken by label. Missing genres are
/// not counted.
pub fn distribution(genres: &[Option<String>], top_n: usize, other_label: &str) -> GenreDistribution {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for genre in genres.iter().flatten() {
        *counts.entry(genre.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

    let total = ranked.iter().map(|c| c.count).sum();
    let rest = ranked.split_off(top_n.min(ranked.len()));

    GenreDistribution {
        top: ranked,
        other: CategoryCount {
            label: other_label.to_string(),
            count: rest.iter().map(|c| c.count).sum(),
        },
        total,
    }
}

/// Mean review count per genre, most reviewed first.
///
/// Ties are broken by label. Rows missing either value are skipped.
pub fn popularity(genres: &[Option<String>], reviews: &[Option<f64>]) -> Vec<GenreReviews> {
    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
    for (genre, count) in genres.iter().zip(reviews.iter()) {
        if let (Some(genre), Some(count)) = (genre, count) {
            groups.entry(genre.as_str()).or_default().push(*count);
        }
    }

    let mut ranked: Vec<GenreReviews> = groups
        .into_iter()
        .filter_map(|(genre, counts)| {
            stats::mean(&counts).map(|mean_reviews| GenreReviews {
                genre: genre.to_string(),
                mean_reviews,
                count: counts.len(),
            })
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.mean_reviews
            .total_cmp(&a.mean_reviews)
            .then_with(|| a.genre.cmp(&b.genre))
    });
    ranked
}

/// Pie chart of the top genres and the aggregated bucket.
pub fn render_distribution(distribution: &GenreDistribution, config: &AnalysisConfig) -> Result<PathBuf> {
    let path = chart_path(config, chart_files::GENRE_DISTRIBUTION);
    let slices = distribution.slices();
    let labels: Vec<String> = slices.iter().map(|s| s.label.clone()).collect();
    let sizes: Vec<f64> = slices.iter().map(|s| s.count as f64).collect();

    // Pie charts use a narrower canvas than the axis charts.
    let size = (config.chart_height * 5 / 4, config.chart_height);
    plotting::pie_chart(
        &labels,
        &sizes,
        "Main genre distribution on GOG.com",
        &path,
        size,
    )?;
    Ok(path)
}

/// Bar chart of the mean review count per genre.
pub fn render_popularity(ranking: &[GenreReviews], config: &AnalysisConfig) -> Result<PathBuf> {
    let path = chart_path(config, chart_files::GENRE_POPULARITY);
    let labels: Vec<String> = ranking.iter().map(|g| g.genre.clone()).collect();
    let means: Vec<f64> = ranking.iter().map(|g| g.mean_reviews).collect();

    plotting::bar_chart(
        &labels,
        &means,
        ChartText::new(
            "Most popular genres by number of user reviews",
            "Genre",
            "Mean number of reviews",
        ),
        &path,
        chart_size(config),
    )?;
    Ok(path)
}
