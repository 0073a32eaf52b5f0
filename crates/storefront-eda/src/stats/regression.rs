//! First-degree least-squares fit.

use tracing::warn;

use crate::error::{EdaError, Result};
use crate::types::LinearFit;

/// Fit `y = slope * x + intercept` by ordinary least squares.
///
/// When `x` is constant (including a single point) the slope is undefined;
/// the fit degenerates to a flat line through the mean of `y`.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    if x.len() != y.len() {
        return Err(EdaError::insufficient(
            "linear fit",
            format!("length mismatch ({} vs {})", x.len(), y.len()),
        ));
    }
    if x.is_empty() {
        return Err(EdaError::insufficient("linear fit", "no points"));
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let (sxx, sxy) = x
        .iter()
        .zip(y.iter())
        .fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - x_mean;
            (sxx + dx * dx, sxy + dx * (yi - y_mean))
        });

    if sxx == 0.0 {
        warn!(
            "Linear fit over constant x ({} points), using a flat line at mean y",
            x.len()
        );
        return Ok(LinearFit {
            slope: 0.0,
            intercept: y_mean,
        });
    }

    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        let fit = linear_fit(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_noisy_points() {
        // Least squares through (1,2), (2,3), (3,5), (4,4):
        // x̄ = 2.5, ȳ = 3.5, Sxx = 5, Sxy = 4 -> slope 0.8, intercept 1.5
        let fit = linear_fit(&[1.0, 2.0, 3.0, 4.0], &[2.0, 3.0, 5.0, 4.0]).unwrap();
        assert!((fit.slope - 0.8).abs() < 1e-12);
        assert!((fit.intercept - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_points() {
        let err = linear_fit(&[], &[]).unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_DATA");
        assert!(linear_fit(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_constant_x_gives_flat_line_at_mean() {
        let fit = linear_fit(&[9.99, 9.99, 9.99, 9.99], &[10.0, 20.0, 30.0, 60.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert!((fit.intercept - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_gives_flat_line() {
        let fit = linear_fit(&[4.99], &[120.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 120.0);
    }
}
