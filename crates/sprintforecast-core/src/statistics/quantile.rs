//! Percentiles by linear interpolation between order statistics.
//!
//! Hyndman & Fan (1996) type 7, the estimator numerical libraries use by
//! default. For sorted `x` of size `n` and probability `p`:
//!
//! ```text
//! h = (n − 1) p
//! q = x[⌊h⌋] + (h − ⌊h⌋) (x[⌊h⌋ + 1] − x[⌊h⌋])
//! ```
//!
//! The result is a convex combination of neighbouring order statistics with
//! an index that is non-decreasing in `p`, so `p₁ ≤ p₂` implies
//! `q(p₁) ≤ q(p₂)` for any sorted input. Summary percentiles are ordered by
//! construction, not by a post-hoc check.
//!
//! # Input Requirements
//!
//! Input must be finite. In debug builds this is checked via assertions.

/// Debug assertion that all values in the slice are finite.
#[inline]
fn debug_assert_finite(data: &[f64]) {
    debug_assert!(
        data.iter().all(|x| x.is_finite()),
        "quantile input must be finite (no NaN or infinity)"
    );
}

/// Sort samples ascending with a total order.
pub fn sort_samples(data: &mut [f64]) {
    data.sort_unstable_by(|a, b| a.total_cmp(b));
}

/// Quantile of already-sorted data.
///
/// # Panics
///
/// Panics if `sorted` is empty or if `p` is outside [0, 1].
pub fn compute_quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "Cannot compute quantile of empty slice");
    assert!((0.0..=1.0).contains(&p), "Quantile probability must be in [0, 1]");
    debug_assert_finite(sorted);

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * p;
    let lo = (h.floor() as usize).min(n - 1);
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;

    let (a, b) = (sorted[lo], sorted[hi]);
    // b >= a, so the interpolant never leaves [a, b]
    (a + frac * (b - a)).clamp(a, b)
}

/// Quantiles of already-sorted data at each probability in `ps`.
pub fn compute_quantiles_sorted(sorted: &[f64], ps: &[f64]) -> Vec<f64> {
    ps.iter().map(|&p| compute_quantile_sorted(sorted, p)).collect()
}

/// Quantile of unsorted data. Clones and sorts the input once.
///
/// # Panics
///
/// Panics if `data` is empty or if `p` is outside [0, 1].
pub fn compute_quantile(data: &[f64], p: f64) -> f64 {
    let mut sorted = data.to_vec();
    sort_samples(&mut sorted);
    compute_quantile_sorted(&sorted, p)
}
