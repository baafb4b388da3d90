use crate::errors::{
    Result,
    SpecSiftError,
};
use crate::utils::sort::rank_descending;

/// Calculates the Spearman rank correlation between two samples of the same
/// size.
///
/// Ranks are assigned descending (the largest value gets rank 1) with ties
/// broken by position, so the result follows the plain
/// `1 - 6 * sum(d^2) / (n * (n^2 - 1))` formula without a tie correction.
/// This is a diagnostic helper; the screening pipeline does not call it.
///
/// # Example
///
/// ```
/// use specsift::utils::correlation::spearman_rank_correlation;
///
/// let a = vec![1.0, 2.0, 3.0];
/// let b = vec![10.0, 20.0, 30.0];
/// let result = spearman_rank_correlation(&a, &b).unwrap();
/// assert!((result - 1.0).abs() < 1e-9);
/// ```
pub fn spearman_rank_correlation(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(SpecSiftError::ExpectedSlicesSameLength {
            expected: a.len(),
            other: b.len(),
            context: "spearman_rank_correlation",
        });
    }
    // The formula divides by n * (n^2 - 1)
    if a.len() < 2 {
        return Err(SpecSiftError::ExpectedNonEmptyData {
            context: "spearman_rank_correlation",
        });
    }

    let ranks_a = rank_descending(a);
    let ranks_b = rank_descending(b);
    let d_squared_sum: f64 = ranks_a
        .iter()
        .zip(ranks_b.iter())
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum();

    let n = a.len() as f64;
    Ok(1.0 - 6.0 * d_squared_sum / (n * (n * n - 1.0)))
}
