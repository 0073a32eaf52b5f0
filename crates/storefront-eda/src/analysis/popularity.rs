//! Popularity (review count) against price and release year.

use std::path::PathBuf;

use tracing::debug;

use super::{chart_files, chart_path, chart_size};
use crate::config::AnalysisConfig;
use crate::error::{Result, ResultExt};
use crate::plotting::{self, ChartText};
use crate::stats::{self, complete_pairs};
use crate::types::{PricePopularity, ReviewOutlier, YearPopularity};

/// Price against review count: outlier listing, least-squares line and
/// Pearson correlation.
///
/// Titles with more than `outlier_threshold` reviews are listed but stay in
/// the fit and the correlation. The listing is ordered by review count,
/// highest first (ties by title), rather than by table position, so it reads
/// the same for any row order.
pub fn price_vs_popularity(
    titles: &[Option<String>],
    prices: &[Option<f64>],
    reviews: &[Option<f64>],
    outlier_threshold: f64,
) -> Result<PricePopularity> {
    let mut outliers: Vec<ReviewOutlier> = titles
        .iter()
        .zip(prices.iter().zip(reviews.iter()))
        .filter_map(|(title, (price, count))| match (price, count) {
            (Some(price), Some(count)) if *count > outlier_threshold => Some(ReviewOutlier {
                title: title.clone().unwrap_or_default(),
                review_count: *count,
                final_amount: *price,
            }),
            _ => None,
        })
        .collect();
    outliers.sort_by(|a, b| {
        b.review_count
            .total_cmp(&a.review_count)
            .then_with(|| a.title.cmp(&b.title))
    });
    debug!("{} titles above {} reviews", outliers.len(), outlier_threshold);

    let (x, y) = complete_pairs(prices, reviews);
    let fit = stats::linear_fit(&x, &y).context("Price vs. popularity")?;
    let correlation = stats::pearson(&x, &y).context("Price vs. popularity")?;

    Ok(PricePopularity {
        outliers,
        fit,
        correlation,
    })
}

/// Release year against review count: Pearson correlation.
pub fn year_vs_popularity(years: &[Option<i32>], reviews: &[Option<f64>]) -> Result<YearPopularity> {
    let years: Vec<Option<f64>> = years.iter().map(|y| y.map(f64::from)).collect();
    let (x, y) = complete_pairs(&years, reviews);
    let correlation = stats::pearson(&x, &y).context("Release year vs. popularity")?;

    Ok(YearPopularity {
        points: x.len(),
        correlation,
    })
}

/// Scatter of price against review count with the fitted line.
pub fn render_price_vs_popularity(
    prices: &[Option<f64>],
    reviews: &[Option<f64>],
    result: &PricePopularity,
    config: &AnalysisConfig,
) -> Result<PathBuf> {
    let path = chart_path(config, chart_files::PRICE_VS_POPULARITY);
    let (x, y) = complete_pairs(prices, reviews);
    let points: Vec<(f64, f64)> = x.into_iter().zip(y).collect();

    plotting::scatter_chart(
        &points,
        Some(&result.fit),
        ChartText::new(
            "Price vs. number of user reviews, with trend line",
            "Price (€)",
            "Number of reviews",
        ),
        &path,
        chart_size(config),
    )?;
    Ok(path)
}

/// Scatter of release year against review count.
pub fn render_year_vs_popularity(
    years: &[Option<i32>],
    reviews: &[Option<f64>],
    config: &AnalysisConfig,
) -> Result<PathBuf> {
    let path = chart_path(config, chart_files::YEAR_VS_POPULARITY);
    let points: Vec<(f64, f64)> = years
        .iter()
        .zip(reviews.iter())
        .filter_map(|(year, count)| Some((f64::from((*year)?), (*count)?)))
        .collect();

    plotting::scatter_chart(
        &points,
        None,
        ChartText::new(
            "User review counts by release year",
            "Release year",
            "Number of reviews",
        ),
        &path,
        chart_size(config),
    )?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn titles(n: usize) -> Vec<Option<String>> {
        (0..n).map(|i| Some(format!("Game {i}"))).collect()
    }

    #[test]
    fn test_outliers_listed_but_kept() {
        let prices = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let reviews = [Some(100.0), Some(2500.0), Some(2000.0), Some(9000.0)];
        let result = price_vs_popularity(&titles(4), &prices, &reviews, 2000.0).unwrap();

        let listed: Vec<(&str, f64)> = result
            .outliers
            .iter()
            .map(|o| (o.title.as_str(), o.review_count))
            .collect();
        assert_eq!(listed, vec![("Game 3", 9000.0), ("Game 1", 2500.0)]);
        assert_eq!(result.correlation.n, 4);
    }

    #[test]
    fn test_fit_and_correlation_on_linear_data() {
        let prices = [Some(0.0), Some(10.0), Some(20.0), None];
        let reviews = [Some(5.0), Some(25.0), Some(45.0), Some(1.0)];
        let result = price_vs_popularity(&titles(4), &prices, &reviews, 2000.0).unwrap();

        assert!((result.fit.slope - 2.0).abs() < 1e-12);
        assert!((result.fit.intercept - 5.0).abs() < 1e-12);
        assert!((result.correlation.r - 1.0).abs() < 1e-9);
        assert_eq!(result.correlation.n, 3);
    }

    #[test]
    fn test_uniform_price_still_produces_a_result() {
        let prices = [Some(9.99); 4];
        let reviews = [Some(10.0), Some(20.0), Some(30.0), Some(60.0)];
        let result = price_vs_popularity(&titles(4), &prices, &reviews, 2000.0).unwrap();

        assert_eq!(result.fit.slope, 0.0);
        assert!((result.fit.intercept - 30.0).abs() < 1e-12);
        assert!(result.correlation.r.is_nan());
        assert_eq!(result.correlation.n, 4);
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let err = price_vs_popularity(&titles(1), &[Some(1.0)], &[Some(3.0)], 2000.0).unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn test_year_vs_popularity() {
        let years = [Some(2000), Some(2005), Some(2010), None];
        let reviews = [Some(30.0), Some(20.0), Some(10.0), Some(50.0)];
        let result = year_vs_popularity(&years, &reviews).unwrap();
        assert_eq!(result.points, 3);
        assert!((result.correlation.r + 1.0).abs() < 1e-9);
    }
}
