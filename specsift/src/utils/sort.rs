use crate::models::Peak;

/// Sorts a peak list ascending by mass.
///
/// The sort is stable, so peaks with equal mass keep their input order.
pub fn sort_peaks_by_mass(peaks: &mut [Peak]) {
    peaks.sort_by(|a, b| a.mass.total_cmp(&b.mass));
}

/// Descending ranks for `values`: the largest value gets rank 1.
///
/// Ties are broken by input position, the earlier element taking the
/// smaller rank.
///
/// Example:
/// ```
/// use specsift::utils::sort::rank_descending;
///
/// let ranks = rank_descending(&[10.0, 40.0, 20.0]);
/// assert_eq!(ranks, vec![3, 1, 2]);
/// ```
pub fn rank_descending(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[j].total_cmp(&values[i]));
    let mut ranks = vec![0; values.len()];
    for (rank, &idx) in order.iter().enumerate() {
        ranks[idx] = rank + 1;
    }
    ranks
}
