//! Shared utilities for reading typed values out of polars frames.
//!
//! The raw export is produced by other tools, so columns that are
//! conceptually numeric or boolean may arrive as strings. The helpers in this
//! module read any of those representations and map unparseable values to
//! `None` instead of failing.

use polars::prelude::*;

use crate::error::{EdaError, Result};

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Characters commonly used in numeric formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Common error/missing value markers in data.
pub const ERROR_MARKERS: [&str; 9] = [
    "error", "unknown", "n/a", "na", "nan", "null", "missing", "none", "#n/a",
];

/// Clean a string for numeric parsing by removing formatting characters.
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Check if a string is an error/missing value marker.
pub fn is_error_marker(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    ERROR_MARKERS.iter().any(|&marker| lower == marker)
}

/// Try to parse a string as a numeric value (f64).
///
/// Handles currency symbols, percentages and thousands separators. Missing
/// markers and NaN give `None`.
///
/// The stripping applies to every numeric column read through this crate, not
/// only to prices: a text cell such as `"1,234"` in `reviewCount` or
/// `globalReleaseDate` reads as `1234` instead of being treated as missing.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    if is_error_marker(s) {
        return None;
    }
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| !v.is_nan())
}

// =============================================================================
// Boolean Detection Utilities
// =============================================================================

/// Common boolean true representations.
pub const BOOLEAN_TRUE_VALUES: [&str; 6] = ["true", "yes", "1", "t", "y", "1.0"];

/// Common boolean false representations.
pub const BOOLEAN_FALSE_VALUES: [&str; 6] = ["false", "no", "0", "f", "n", "0.0"];

/// Parse a boolean from its common string representations.
pub fn parse_boolean_string(s: &str) -> Option<bool> {
    let lower = s.trim().to_ascii_lowercase();
    if BOOLEAN_TRUE_VALUES.iter().any(|&v| v == lower) {
        Some(true)
    } else if BOOLEAN_FALSE_VALUES.iter().any(|&v| v == lower) {
        Some(false)
    } else {
        None
    }
}

// =============================================================================
// Column Extraction Utilities
// =============================================================================

/// Look up a column as a materialized series.
pub fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|col| col.as_materialized_series())
        .map_err(|_| EdaError::ColumnNotFound(name.to_string()))
}

/// Read a series as floats; unparseable values and NaN become `None`.
pub fn series_as_f64(series: &Series) -> Result<Vec<Option<f64>>> {
    if series.dtype() == &DataType::String {
        return Ok(series
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_numeric_string))
            .collect());
    }

    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Read a series as booleans.
///
/// Accepts boolean columns, string columns with common true/false spellings
/// and numeric columns (non-zero is true).
pub fn series_as_bool(series: &Series) -> Result<Vec<Option<bool>>> {
    match series.dtype() {
        DataType::Boolean => Ok(series.bool()?.into_iter().collect()),
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_boolean_string))
            .collect()),
        dtype if is_numeric_dtype(dtype) => Ok(series_as_f64(series)?
            .into_iter()
            .map(|v| v.map(|x| x != 0.0))
            .collect()),
        _ => Ok(vec![None; series.len()]),
    }
}

/// Read a series as owned strings, casting non-string columns.
pub fn series_as_string(series: &Series) -> Result<Vec<Option<String>>> {
    let strings = series.cast(&DataType::String)?;
    Ok(strings
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// [`series_as_f64`] for a named column.
pub fn column_as_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    series_as_f64(series(df, name)?)
}

/// [`series_as_bool`] for a named column.
pub fn column_as_bool(df: &DataFrame, name: &str) -> Result<Vec<Option<bool>>> {
    series_as_bool(series(df, name)?)
}

/// [`series_as_string`] for a named column.
pub fn column_as_string(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    series_as_string(series(df, name)?)
}

/// Collect the first `max_samples` values of a column for display.
pub fn collect_sample_values(series: &Series, max_samples: usize) -> Vec<String> {
    let sample_size = std::cmp::min(max_samples, series.len());
    let mut samples = Vec::with_capacity(sample_size);

    for i in 0..sample_size {
        if let Ok(val) = series.get(i) {
            samples.push(format!("{}", val));
        }
    }

    samples
}

// =============================================================================
// Tests
// =============================================================================
