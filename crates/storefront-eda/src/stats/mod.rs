//! Statistics used by the analyses.
//!
//! Significance tests come from `anofox_statistics`; the wrappers here fix
//! the degenerate cases (too few points, constant or fully tied samples)
//! before calling into it. Every routine depends only on the multiset of
//! observations (or pairs), never on their order.

mod correlation;
mod mann_whitney;
mod regression;

pub use correlation::pearson;
pub use mann_whitney::mann_whitney_u;
pub use regression::linear_fit;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Keep only the pairs where both values are present.
pub fn complete_pairs(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some((*a, *b)),
            _ => None,
        })
        .unzip()
}
