//! Two-sided Mann-Whitney U test.

use anofox_statistics::nonparametric::wilcoxon::mann_whitney_u as wilcoxon_rank_sum;
use anofox_statistics::parametric::ttest::Alternative;
use tracing::warn;

use crate::error::{EdaError, Result};
use crate::types::MannWhitneyResult;

/// Two-sided Mann-Whitney U test of `x` against `y`.
///
/// The reported statistic is U of `x`. When every observation is tied the
/// samples carry no evidence either way: U sits at its mean and the p-value
/// is 1.
pub fn mann_whitney_u(x: &[f64], y: &[f64]) -> Result<MannWhitneyResult> {
    if x.is_empty() || y.is_empty() {
        return Err(EdaError::insufficient(
            "Mann-Whitney U test",
            format!("group sizes {} and {}, both must be non-empty", x.len(), y.len()),
        ));
    }

    let first = x[0];
    if x.iter().chain(y.iter()).all(|v| *v == first) {
        warn!(
            "Mann-Whitney U test on fully tied samples ({} vs {} observations)",
            x.len(),
            y.len()
        );
        return Ok(MannWhitneyResult {
            u: (x.len() * y.len()) as f64 / 2.0,
            p_value: 1.0,
        });
    }

    let result = wilcoxon_rank_sum(x, y, Alternative::TwoSided, true, false, Some(0.95), None)
        .map_err(|e| EdaError::Statistics(format!("Mann-Whitney U test: {e}")))?;

    Ok(MannWhitneyResult {
        u: result.statistic,
        p_value: result.p_value.clamp(0.0, 1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separated_groups() {
        let result = mann_whitney_u(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert_eq!(result.u, 0.0);
        // Smallest attainable p for 3 vs 3 lies between 0.05 and 0.1
        assert!(result.p_value > 0.05 && result.p_value <= 0.1 + 1e-9);
    }

    #[test]
    fn test_swapped_groups_report_complementary_u() {
        let forward = mann_whitney_u(&[1.0, 5.0, 7.0], &[2.0, 3.0, 9.0, 11.0]).unwrap();
        let swapped = mann_whitney_u(&[2.0, 3.0, 9.0, 11.0], &[1.0, 5.0, 7.0]).unwrap();
        assert_eq!(forward.u + swapped.u, 12.0);
        assert!((forward.p_value - swapped.p_value).abs() < 1e-9);
    }

    #[test]
    fn test_ties_use_average_ranks() {
        // Ranks 1, 3, 3 | 3, 5: U of the first sample is 1
        let result = mann_whitney_u(&[1.0, 2.0, 2.0], &[2.0, 3.0]).unwrap();
        assert_eq!(result.u, 1.0);
        assert!(result.p_value > 0.2 && result.p_value <= 1.0);
    }

    #[test]
    fn test_large_shifted_samples() {
        let x: Vec<f64> = (0..40).map(f64::from).collect();
        let y: Vec<f64> = (30..70).map(|v| f64::from(v) + 0.5).collect();
        let result = mann_whitney_u(&x, &y).unwrap();
        assert!(result.p_value < 1e-6);
    }

    #[test]
    fn test_all_tied_gives_p_one() {
        let result = mann_whitney_u(&[5.0, 5.0], &[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(result.u, 3.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_empty_group_is_an_error() {
        let err = mann_whitney_u(&[], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn test_order_invariance() {
        let x = [12.0, 40.0, 3.0, 8.0, 8.0, 19.0, 27.0, 5.0, 14.0, 2.0];
        let y = [30.0, 8.0, 45.0, 60.0, 22.0, 17.0, 51.0, 9.0, 33.0];
        let forward = mann_whitney_u(&x, &y).unwrap();

        let mut rx = x;
        let mut ry = y;
        rx.reverse();
        ry.rotate_left(4);
        let shuffled = mann_whitney_u(&rx, &ry).unwrap();

        assert_eq!(forward.u, shuffled.u);
        assert!((forward.p_value - shuffled.p_value).abs() < 1e-12);
    }
}
