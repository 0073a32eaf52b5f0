//! Pearson product-moment correlation.

use anofox_statistics::correlation::pearson as pearson_test;
use tracing::warn;

use crate::error::{EdaError, Result};
use crate::types::CorrelationResult;

/// Confidence level passed to the correlation test.
const CONFIDENCE_LEVEL: f64 = 0.95;

/// Pearson correlation coefficient with its two-sided p-value.
///
/// With exactly two points the coefficient is ±1 and the p-value is 1.
/// If either sample is constant the coefficient is undefined and both values
/// are NaN.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    if x.len() != y.len() {
        return Err(EdaError::insufficient(
            "Pearson correlation",
            format!("length mismatch ({} vs {})", x.len(), y.len()),
        ));
    }
    let n = x.len();
    if n < 2 {
        return Err(EdaError::insufficient(
            "Pearson correlation",
            format!("{n} point(s), need at least 2"),
        ));
    }

    if is_constant(x) || is_constant(y) {
        warn!("Pearson correlation is undefined for constant input ({n} points)");
        return Ok(CorrelationResult {
            r: f64::NAN,
            p_value: f64::NAN,
            n,
        });
    }

    if n == 2 {
        let r = ((x[1] - x[0]) * (y[1] - y[0])).signum();
        return Ok(CorrelationResult { r, p_value: 1.0, n });
    }

    let result = pearson_test(x, y, Some(CONFIDENCE_LEVEL))
        .map_err(|e| EdaError::Statistics(format!("Pearson correlation: {e}")))?;

    Ok(CorrelationResult {
        r: result.estimate.clamp(-1.0, 1.0),
        p_value: result.p_value.clamp(0.0, 1.0),
        n,
    })
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive() {
        let result = pearson(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert!((result.r - 1.0).abs() < 1e-9);
        assert!(result.p_value < 1e-6);
        assert_eq!(result.n, 4);
    }

    #[test]
    fn test_known_value() {
        // x = 1..5, y = [2, 4, 5, 4, 5]: r = 6 / sqrt(10 * 6) = 0.774597
        // t = r * sqrt(3 / (1 - r^2)) = 2.12132, two-sided p (df 3) = 0.124
        let result = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]).unwrap();
        assert!((result.r - 0.774_596_669).abs() < 1e-6);
        assert!((result.p_value - 0.1240).abs() < 1e-3);
    }

    #[test]
    fn test_negative_correlation() {
        let result = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[9.0, 7.0, 6.0, 3.0, 1.0]).unwrap();
        assert!(result.r < -0.9);
        assert!(result.p_value < 0.05);
    }

    #[test]
    fn test_two_points() {
        let result = pearson(&[1.0, 2.0], &[5.0, 3.0]).unwrap();
        assert_eq!(result.r, -1.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_constant_input_is_nan() {
        let result = pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        assert!(result.r.is_nan());
        assert!(result.p_value.is_nan());
    }

    #[test]
    fn test_too_few_points() {
        assert!(pearson(&[1.0], &[1.0]).is_err());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_order_invariance() {
        let x = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let y = [2.0, 7.0, 1.0, 8.0, 2.0, 8.0, 1.0, 8.0];
        let forward = pearson(&x, &y).unwrap();

        let mut rx = x;
        let mut ry = y;
        rx.reverse();
        ry.reverse();
        let reversed = pearson(&rx, &ry).unwrap();

        assert!((forward.r - reversed.r).abs() < 1e-12);
        assert!((forward.p_value - reversed.p_value).abs() < 1e-12);
    }
}
