//! Proper scoring rules for sample-based forecasts.
//!
//! ## CRPS
//!
//! For an ensemble `x₁..xₙ` sorted ascending, the pairwise spread term has
//! the closed form
//!
//! ```text
//! ½ E|X − X'| = (1/n²) Σᵢ (2i − n − 1) xᵢ        (i = 1..n)
//! ```
//!
//! which needs one sort instead of an O(n²) double sum. [`crps_sorted`]
//! reports this self-referential score for a forecast with no observed
//! outcome; [`crps_observed`] scores the ensemble against an outcome `y` as
//! `E|X − y| − ½ E|X − X'|`.
//!
//! ## Brier
//!
//! With a single probabilistic forecast `p` of "deadline met" and no per-path
//! ground truth, [`brier_self`] uses the expected quadratic score under the
//! forecast itself, `p (1 − p)`. Once the sprint is over,
//! [`brier_observed`] scores `p` against what happened.

/// Closed-form ensemble CRPS spread term of sorted samples.
///
/// Returns 0 for empty input.
pub fn crps_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    debug_assert!(
        sorted.windows(2).all(|w| w[0] <= w[1]),
        "crps_sorted requires ascending input"
    );
    let nf = n as f64;
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(k, &x)| (2.0 * (k + 1) as f64 - nf - 1.0) * x)
        .sum();
    // Rounding can leave a tiny negative value for constant samples
    (weighted / (nf * nf)).max(0.0)
}

/// CRPS of sorted ensemble `sorted` against observed outcome `observed`.
///
/// Returns 0 for empty input.
pub fn crps_observed(sorted: &[f64], observed: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let mean_abs_error = sorted.iter().map(|x| (x - observed).abs()).sum::<f64>() / n as f64;
    (mean_abs_error - crps_sorted(sorted)).max(0.0)
}

/// Expected Brier score of probability `p` under the forecast itself.
pub fn brier_self(p: f64) -> f64 {
    p * (1.0 - p)
}

/// Brier score of probability `p` against the realized binary outcome.
pub fn brier_observed(p: f64, event_occurred: bool) -> f64 {
    let outcome = if event_occurred { 1.0 } else { 0.0 };
    (p - outcome) * (p - outcome)
}
