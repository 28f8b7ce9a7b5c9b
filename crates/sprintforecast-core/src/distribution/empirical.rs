//! Bootstrap resampling from an observed pool.

use rand::Rng;

use crate::error::{Error, Result};

/// Resamples, with replacement, from historical observations.
///
/// An empty pool can be held but not sampled: drawing from it is a
/// [`Error::Data`], never a fabricated value.
#[derive(Debug, Clone, PartialEq)]
pub struct Empirical {
    pool: Vec<f64>,
}

impl Empirical {
    /// Wrap a pool of observations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any observation is not finite.
    pub fn new(pool: Vec<f64>) -> Result<Self> {
        if let Some(bad) = pool.iter().find(|x| !x.is_finite()) {
            return Err(Error::validation("pool", format!("observations must be finite, got {bad}")));
        }
        Ok(Self { pool })
    }

    /// The observations.
    pub fn pool(&self) -> &[f64] {
        &self.pool
    }

    /// Whether there is nothing to resample.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Fail with [`Error::Data`] if the pool is empty.
    pub fn ensure_sampleable(&self) -> Result<()> {
        if self.pool.is_empty() {
            return Err(Error::data("empirical pool is empty"));
        }
        Ok(())
    }

    /// One resampled observation. The pool must be non-empty.
    #[inline]
    pub(crate) fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.pool[rng.random_range(0..self.pool.len())]
    }

    /// One resampled observation.
    pub fn try_draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        self.ensure_sampleable()?;
        Ok(self.draw(rng))
    }
}
