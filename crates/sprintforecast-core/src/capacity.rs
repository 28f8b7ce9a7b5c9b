//! Lognormal posterior over per-sprint team capacity.

use rand::Rng;

use crate::distribution::LogNormal;
use crate::error::Result;
use crate::statistics::{log_moments, Degeneracy};

/// Fitted lognormal distribution of hours a team delivers in one sprint.
///
/// `mu = sigma = 0` is the degenerate case: every draw is exactly
/// `exp(0) = 1`.
#[derive(Debug, Clone)]
pub struct CapacityPosterior {
    dist: LogNormal,
}

impl CapacityPosterior {
    /// Posterior with explicit log-space parameters.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if `mu` is not finite or `sigma`
    /// is negative or not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        Ok(Self {
            dist: LogNormal::new(mu, sigma)?,
        })
    }

    /// Fit from historical per-sprint totals.
    ///
    /// `mu` and `sigma` are the mean and Bessel-corrected standard deviation
    /// of `ln(history)`. A single sprint, or a history where every sprint
    /// delivered the same total, yields `sigma = 0` and logs a warning.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Data`] if `history` is empty.
    /// - [`crate::Error::Validation`] if any total is not positive.
    pub fn fit(history: &[f64]) -> Result<Self> {
        let moments = log_moments(history)?;
        match moments.degeneracy() {
            Some(Degeneracy::SingleObservation) => tracing::warn!(
                sprints = moments.n,
                "capacity history has a single sprint; posterior is degenerate"
            ),
            Some(Degeneracy::ZeroVariance) => tracing::warn!(
                sprints = moments.n,
                "capacity history has zero variance; posterior is degenerate"
            ),
            None => {}
        }
        tracing::debug!(mu = moments.mu, sigma = moments.sigma, sprints = moments.n, "fitted capacity posterior");
        Self::new(moments.mu, moments.sigma)
    }

    /// Log-space location.
    pub fn mu(&self) -> f64 {
        self.dist.mu()
    }

    /// Log-space scale.
    pub fn sigma(&self) -> f64 {
        self.dist.sigma()
    }

    /// One capacity draw.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.dist.draw(rng)
    }

    /// `n` positive capacity draws.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n).map(|_| self.draw(rng)).collect()
    }

    /// The underlying lognormal distribution.
    pub fn into_lognormal(self) -> LogNormal {
        self.dist
    }
}
