//! Row filters applied by the cleaner.

use polars::prelude::*;

use crate::error::Result;
use crate::types::columns;
use crate::utils::{column_as_bool, column_as_f64};

/// Rows whose `isGame` flag is true. Missing or unparseable flags are not games.
pub(crate) fn game_mask(df: &DataFrame) -> Result<BooleanChunked> {
    Ok(column_as_bool(df, columns::IS_GAME)?
        .into_iter()
        .map(|v| v == Some(true))
        .collect())
}

/// Rows with a strictly positive `reviewCount`.
pub(crate) fn reviewed_mask(df: &DataFrame) -> Result<BooleanChunked> {
    Ok(column_as_f64(df, columns::REVIEW_COUNT)?
        .into_iter()
        .map(|v| v.is_some_and(|count| count > 0.0))
        .collect())
}

/// Rows where every column in `required` holds a usable value.
pub(crate) fn complete_mask(df: &DataFrame, required: &[&str]) -> Result<BooleanChunked> {
    let mut keep = vec![true; df.height()];
    for name in required {
        for (flag, value) in keep.iter_mut().zip(column_as_f64(df, name)?) {
            *flag &= value.is_some();
        }
    }
    Ok(keep.into_iter().collect())
}

/// Apply a mask and return the filtered frame with the number of dropped rows.
pub(crate) fn apply(df: &DataFrame, mask: &BooleanChunked) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let filtered = df.filter(mask)?;
    let dropped = before - filtered.height();
    Ok((filtered, dropped))
}
