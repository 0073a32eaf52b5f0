//! Effect of discounts on popularity.

use crate::error::{EdaError, Result};
use crate::stats;
use crate::types::{DiscountEffect, DiscountGroup};

/// Mean review count per `isDiscounted` group (non-discounted first) and a
/// two-sided Mann-Whitney U test of discounted against non-discounted titles.
///
/// Both groups must be non-empty.
pub fn compute(flags: &[Option<bool>], reviews: &[Option<f64>]) -> Result<DiscountEffect> {
    let mut discounted = Vec::new();
    let mut regular = Vec::new();
    for (flag, count) in flags.iter().zip(reviews.iter()) {
        match (flag, count) {
            (Some(true), Some(count)) => discounted.push(*count),
            (Some(false), Some(count)) => regular.push(*count),
            _ => {}
        }
    }

    let groups = [(false, &regular), (true, &discounted)]
        .into_iter()
        .map(|(is_discounted, values)| -> Result<DiscountGroup> {
            let mean_reviews = stats::mean(values).ok_or_else(|| {
                EdaError::insufficient(
                    "discount effect",
                    format!("no titles with isDiscounted = {is_discounted}"),
                )
            })?;
            Ok(DiscountGroup {
                is_discounted,
                mean_reviews,
                count: values.len(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let test = stats::mann_whitney_u(&discounted, &regular)?;

    Ok(DiscountEffect { groups, test })
}
