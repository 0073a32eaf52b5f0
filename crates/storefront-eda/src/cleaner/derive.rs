//! Derived columns: `main_genre` and `release_year`.
//!
//! Both derivations coerce instead of failing. A malformed genre list yields
//! a degenerate label and an unusable timestamp yields a null year, which the
//! completeness filter later drops.

use chrono::{DateTime, Datelike, Utc};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

use crate::error::Result;
use crate::types::columns;
use crate::utils::{series_as_f64, series_as_string};

/// Characters removed from the first genre token.
static GENRE_DECORATIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\[\]']").expect("Invalid regex: genre decorations"));

/// First genre of a comma-delimited list with brackets and quotes removed.
///
/// `"['Action', 'RPG']"` becomes `"Action"`. The result contains no comma,
/// bracket or single quote and is trimmed, so applying the function to its own
/// output returns it unchanged.
pub fn main_genre(genres: &str) -> String {
    let first = genres.split(',').next().unwrap_or_default();
    GENRE_DECORATIONS.replace_all(first, "").trim().to_string()
}

/// Calendar year (UTC) of a Unix timestamp in seconds.
///
/// Fractional seconds are truncated. Negative, non-finite and out-of-range
/// timestamps give `None`.
pub fn release_year(epoch_seconds: f64) -> Option<i32> {
    if !epoch_seconds.is_finite() || epoch_seconds < 0.0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(epoch_seconds.trunc() as i64, 0).map(|dt| dt.year())
}

/// Build the `main_genre` column from a `genres` column of any type.
///
/// Missing values are treated as the empty string.
pub(crate) fn derive_main_genre(genres: &Series) -> Result<Series> {
    let values: Vec<String> = series_as_string(genres)?
        .into_iter()
        .map(|v| main_genre(v.as_deref().unwrap_or_default()))
        .collect();
    Ok(Series::new(columns::MAIN_GENRE.into(), values))
}

/// Build the nullable `release_year` column from `globalReleaseDate`.
pub(crate) fn derive_release_year(release_dates: &Series) -> Result<Series> {
    let values: Vec<Option<i32>> = series_as_f64(release_dates)?
        .into_iter()
        .map(|v| v.and_then(release_year))
        .collect();
    Ok(Series::new(columns::RELEASE_YEAR.into(), values))
}
