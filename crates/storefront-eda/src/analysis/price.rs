//! Price distribution over fixed-width bins.

use std::path::PathBuf;

use tracing::debug;

use super::{chart_files, chart_path, chart_size};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::plotting::{self, ChartText};
use crate::types::{PriceBin, PriceDistribution};

/// Count prices into half-open bins `[k * width, (k + 1) * width)` that cover
/// `[0, upper)`.
///
/// Prices below zero or at/above `upper` are counted as out of range; missing
/// prices are skipped.
pub fn compute(prices: &[Option<f64>], width: f64, upper: f64) -> PriceDistribution {
    let bin_count = (upper / width).ceil() as usize;
    let mut bins: Vec<PriceBin> = (0..bin_count)
        .map(|k| {
            let lower = k as f64 * width;
            let upper = (k + 1) as f64 * width;
            PriceBin {
                lower,
                upper,
                label: format!("{lower}–{upper} €"),
                count: 0,
            }
        })
        .collect();

    let mut out_of_range = 0;
    for price in prices.iter().flatten() {
        if *price < 0.0 || *price >= upper {
            out_of_range += 1;
            continue;
        }
        let index = ((price / width).floor() as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    debug!(
        "Binned {} prices into {} bins, {} out of range",
        bins.iter().map(|b| b.count).sum::<usize>(),
        bin_count,
        out_of_range
    );

    PriceDistribution { bins, out_of_range }
}

/// Bar chart of the bin counts.
pub fn render(distribution: &PriceDistribution, config: &AnalysisConfig) -> Result<PathBuf> {
    let path = chart_path(config, chart_files::PRICE_DISTRIBUTION);
    let labels: Vec<String> = distribution.bins.iter().map(|b| b.label.clone()).collect();
    let counts: Vec<f64> = distribution.bins.iter().map(|b| b.count as f64).collect();
    let title = format!(
        "Price distribution of games on GOG.com ({} € bins)",
        config.price_bin_width
    );

    plotting::bar_chart(
        &labels,
        &counts,
        ChartText::new(&title, "Price (€)", "Number of games"),
        &path,
        chart_size(config),
    )?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_bins_partition_range() {
        let distribution = compute(&[], 2.0, 52.0);
        assert_eq!(distribution.bins.len(), 26);
        assert_eq!(distribution.bins[0].lower, 0.0);
        assert_eq!(distribution.bins[25].upper, 52.0);
        for pair in distribution.bins.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }

    #[test]
    fn test_bin_labels() {
        let distribution = compute(&[], 2.0, 52.0);
        assert_eq!(distribution.bins[0].label, "0–2 €");
        assert_eq!(distribution.bins[25].label, "50–52 €");
    }

    #[test]
    fn test_half_open_edges() {
        let prices = [Some(0.0), Some(1.99), Some(2.0), Some(51.99), Some(52.0), Some(-1.0), None];
        let distribution = compute(&prices, 2.0, 52.0);

        assert_eq!(distribution.bins[0].count, 2);
        assert_eq!(distribution.bins[1].count, 1);
        assert_eq!(distribution.bins[25].count, 1);
        assert_eq!(distribution.out_of_range, 2);
        assert_eq!(distribution.binned_total(), 4);
    }

    #[test]
    fn test_every_in_range_price_lands_in_one_bin() {
        let prices: Vec<Option<f64>> = (0..520).map(|c| Some(f64::from(c) / 10.0)).collect();
        let distribution = compute(&prices, 2.0, 52.0);
        assert_eq!(distribution.binned_total(), 520);
        assert!(distribution.bins.iter().all(|b| b.count == 20));
    }

    #[test]
    fn test_custom_binning() {
        let distribution = compute(&[Some(7.5)], 5.0, 20.0);
        assert_eq!(distribution.bins.len(), 4);
        assert_eq!(distribution.bins[1].count, 1);
        assert_eq!(distribution.bins[1].label, "5–10 €");
    }
}
