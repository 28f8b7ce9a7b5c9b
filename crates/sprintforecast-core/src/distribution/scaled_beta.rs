//! Bounded noise: Beta(a, b) rescaled onto [low, high].

use rand::Rng;
use rand_distr::{Beta, Distribution as _};

use crate::error::{Error, Result};

/// Beta distribution on an arbitrary interval.
///
/// Used for review lag and for per-sprint capacity priors.
#[derive(Debug, Clone)]
pub struct ScaledBeta {
    a: f64,
    b: f64,
    low: f64,
    high: f64,
    beta: Beta<f64>,
}

impl ScaledBeta {
    /// Create the distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] unless `a`, `b` are positive and finite
    /// and `low < high` are finite.
    pub fn new(a: f64, b: f64, low: f64, high: f64) -> Result<Self> {
        crate::error::ensure_positive("a", a)?;
        crate::error::ensure_positive("b", b)?;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(Error::validation(
                "bounds",
                format!("low < high must hold with finite bounds, got [{low}, {high}]"),
            ));
        }
        let beta = Beta::new(a, b).map_err(|e| Error::validation("a", e.to_string()))?;
        Ok(Self { a, b, low, high, beta })
    }

    /// First shape parameter.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Second shape parameter.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Lower bound.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// One draw in `[low, high]`.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.low + (self.high - self.low) * self.beta.sample(rng)
    }

    /// Mean `low + (high − low) · a / (a + b)`.
    pub fn mean(&self) -> f64 {
        self.low + (self.high - self.low) * self.a / (self.a + self.b)
    }
}
