//! Chart rendering.
//!
//! Charts are drawn with the [`plotters`] bitmap backend and saved as PNG
//! files, so rendering works in headless environments. Each function takes
//! prepared data and an output path; the analyses decide what to draw.

mod charts;

pub use charts::{bar_chart, pie_chart, scatter_chart, step_area_chart};

use std::ops::Range;

use plotters::style::RGBColor;
use thiserror::Error;

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save chart to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = core::result::Result<T, PlotError>;

/// Caption and axis descriptions of a chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartText<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
}

impl<'a> ChartText<'a> {
    pub fn new(title: &'a str, x_desc: &'a str, y_desc: &'a str) -> Self {
        Self {
            title,
            x_desc,
            y_desc,
        }
    }
}

/// Slice colors for pie charts, cycled when there are more slices.
pub const PIE_PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

/// Axis range covering `values` with a relative margin on both sides.
///
/// Degenerate inputs (empty, or a single distinct value) still produce a
/// non-empty range.
pub fn padded_range(values: impl IntoIterator<Item = f64>, margin: f64) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return 0.0..1.0;
    }
    if min == max {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        return (min - pad)..(max + pad);
    }

    let pad = (max - min) * margin;
    (min - pad)..(max + pad)
}

/// Upper bound for a count or mean axis that starts at zero.
pub fn value_axis_max(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

/// Vertices of a step line whose value changes midway between points.
///
/// Input points must be sorted by x.
pub fn mid_step_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for (i, &(x, y)) in points.iter().enumerate() {
        if i > 0 {
            let (prev_x, prev_y) = points[i - 1];
            let mid = (prev_x + x) / 2.0;
            out.push((mid, prev_y));
            out.push((mid, y));
        }
        out.push((x, y));
    }
    out
}

/// Label for a year axis tick; fractional ticks stay blank.
pub fn year_tick_label(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let range = padded_range([0.0, 10.0], 0.05);
        assert!((range.start + 0.5).abs() < 1e-12);
        assert!((range.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_padded_range_degenerate() {
        assert_eq!(padded_range(Vec::new(), 0.05), 0.0..1.0);
        let single = padded_range([5.0], 0.05);
        assert!(single.start < 5.0 && single.end > 5.0);
        let zero = padded_range([0.0, 0.0], 0.05);
        assert_eq!(zero, -1.0..1.0);
    }

    #[test]
    fn test_value_axis_max() {
        assert!((value_axis_max(&[2.0, 10.0]) - 11.0).abs() < 1e-12);
        assert_eq!(value_axis_max(&[]), 1.0);
        assert_eq!(value_axis_max(&[0.0]), 1.0);
    }

    #[test]
    fn test_mid_step_points() {
        let steps = mid_step_points(&[(2000.0, 1.0), (2002.0, 3.0)]);
        assert_eq!(
            steps,
            vec![(2000.0, 1.0), (2001.0, 1.0), (2001.0, 3.0), (2002.0, 3.0)]
        );
        assert!(mid_step_points(&[]).is_empty());
    }

    #[test]
    fn test_year_tick_label() {
        assert_eq!(year_tick_label(2015.0), "2015");
        assert_eq!(year_tick_label(2015.5), "");
    }

    #[test]
    fn test_plot_error_messages() {
        let err = PlotError::InvalidData("no bars".to_string());
        assert_eq!(err.to_string(), "Invalid data: no bars");
    }
}
