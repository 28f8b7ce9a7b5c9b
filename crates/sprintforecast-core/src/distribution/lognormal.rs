//! Lognormal noise: `exp(Normal(mu, sigma))`.

use rand::Rng;
use rand_distr::{Distribution as _, Normal};

use crate::error::{Error, Result};

/// Lognormal distribution with log-space location `mu` and scale `sigma`.
///
/// `sigma = 0` is the degenerate case: every draw is exactly `exp(mu)` and no
/// randomness is consumed. This is what deterministic tests rely on.
#[derive(Debug, Clone)]
pub struct LogNormal {
    mu: f64,
    sigma: f64,
    normal: Option<Normal<f64>>,
}

impl LogNormal {
    /// Create the distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `mu` is not finite or `sigma` is
    /// negative or not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(Error::validation("mu", format!("must be finite, got {mu}")));
        }
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(Error::validation(
                "sigma",
                format!("must be finite and >= 0, got {sigma}"),
            ));
        }
        let normal = if sigma > 0.0 {
            Some(Normal::new(mu, sigma).map_err(|e| Error::validation("sigma", e.to_string()))?)
        } else {
            None
        };
        Ok(Self { mu, sigma, normal })
    }

    /// Log-space location.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Log-space scale.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Whether every draw is the constant `exp(mu)`.
    pub fn is_degenerate(&self) -> bool {
        self.normal.is_none()
    }

    /// Draw the log-space value `Normal(mu, sigma)`.
    #[inline]
    pub fn draw_log<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.normal {
            Some(normal) => normal.sample(rng),
            None => self.mu,
        }
    }

    /// Draw `exp(Normal(mu, sigma))`.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.draw_log(rng).exp()
    }

    /// Mean `exp(mu + sigma² / 2)`.
    pub fn mean(&self) -> f64 {
        (self.mu + 0.5 * self.sigma * self.sigma).exp()
    }
}
