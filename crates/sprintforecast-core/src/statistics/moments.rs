//! Sample moments.

use crate::error::{Error, Result};

/// Location and scale of log-transformed observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogMoments {
    /// Mean of `ln(x)`.
    pub mu: f64,
    /// Bessel-corrected standard deviation of `ln(x)`; 0 for a single observation.
    pub sigma: f64,
    /// Number of observations used.
    pub n: usize,
}

/// Why a lognormal fit from these moments collapses to a point mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// Only one observation.
    SingleObservation,
    /// Every observation has the same log value (up to rounding).
    ZeroVariance,
}

impl LogMoments {
    /// `Some` when `sigma` is effectively zero.
    pub fn degeneracy(&self) -> Option<Degeneracy> {
        if self.n < 2 {
            Some(Degeneracy::SingleObservation)
        } else if self.sigma <= 1e-12 * self.mu.abs().max(1.0) {
            Some(Degeneracy::ZeroVariance)
        } else {
            None
        }
    }
}

/// Arithmetic mean. `NaN` for empty input.
pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Bessel-corrected sample standard deviation. 0 for fewer than two observations.
pub fn sample_std(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Mean and Bessel-corrected standard deviation of `ln(x)`.
///
/// # Errors
///
/// - [`Error::Data`] if `data` is empty.
/// - [`Error::Validation`] if any value is not positive and finite.
pub fn log_moments(data: &[f64]) -> Result<LogMoments> {
    let logs = logs_of(data)?;
    Ok(LogMoments {
        mu: mean(&logs),
        sigma: sample_std(&logs),
        n: logs.len(),
    })
}

/// Weighted mean and standard deviation of `ln(x)`.
///
/// The variance uses the reliability-weights correction
/// `Σw (x − μ)² / (Σw − Σw² / Σw)`, which reduces to Bessel's correction for
/// equal weights.
///
/// # Errors
///
/// As [`log_moments`], plus [`Error::Validation`] if `weights` has a different
/// length, a negative or non-finite entry, or sums to zero.
pub fn weighted_log_moments(data: &[f64], weights: &[f64]) -> Result<LogMoments> {
    if weights.len() != data.len() {
        return Err(Error::validation(
            "weights",
            format!("expected {} weights, got {}", data.len(), weights.len()),
        ));
    }
    if weights.iter().any(|w| !(w.is_finite() && *w >= 0.0)) {
        return Err(Error::validation("weights", "weights must be finite and non-negative"));
    }
    let logs = logs_of(data)?;
    let w_sum: f64 = weights.iter().sum();
    if w_sum <= 0.0 {
        return Err(Error::validation("weights", "weights must not all be zero"));
    }

    let mu = logs.iter().zip(weights).map(|(x, w)| w * x).sum::<f64>() / w_sum;
    let w_sq: f64 = weights.iter().map(|w| w * w).sum();
    let denom = w_sum - w_sq / w_sum;
    let sigma = if denom > 0.0 {
        let ss: f64 = logs.iter().zip(weights).map(|(x, w)| w * (x - mu) * (x - mu)).sum();
        (ss / denom).sqrt()
    } else {
        0.0
    };

    Ok(LogMoments {
        mu,
        sigma,
        n: logs.len(),
    })
}

fn logs_of(data: &[f64]) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(Error::data("no observations to fit"));
    }
    data.iter()
        .map(|&x| {
            if x.is_finite() && x > 0.0 {
                Ok(x.ln())
            } else {
                Err(Error::validation("history", format!("values must be positive, got {x}")))
            }
        })
        .collect()
}
