//! Forward projection of team capacity from recent sprints.
//!
//! Same lognormal technique as [`CapacityPosterior`], with the location
//! pulled toward a stated target:
//!
//! ```text
//! μ, σ  = log-moments of the history
//! μ'    = (1 − anchor) μ + anchor ln(target)
//! ```
//!
//! With `anchor_weight = 0` the fit equals [`CapacityPosterior::fit`]. A
//! trailing window and a per-sprint decay (`w_k = decay^k`, `k = 0` for the
//! latest sprint) can be switched on through [`MomentumConfig`].
//!
//! [`CapacityPosterior`]: sprintforecast_core::CapacityPosterior
//! [`CapacityPosterior::fit`]: sprintforecast_core::CapacityPosterior::fit

use rand::Rng;

use sprintforecast_core::constants::{DEFAULT_ANCHOR_WEIGHT, DEFAULT_MOMENTUM_DECAY};
use sprintforecast_core::distribution::LogNormal;
use sprintforecast_core::statistics::{log_moments, weighted_log_moments, Degeneracy};
use sprintforecast_core::{CapacityStrategy, Error, Result};

/// Fitting knobs for [`MomentumModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumConfig {
    /// Trailing sprints retained. Default: `None` (all history).
    pub window: Option<usize>,
    /// Weight ratio between consecutive sprints, in (0, 1]. Default: 1.
    pub decay: f64,
    /// Pull of `ln(target)` on the location, in [0, 1]. Default: 0.25.
    pub anchor_weight: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            window: None,
            decay: DEFAULT_MOMENTUM_DECAY,
            anchor_weight: DEFAULT_ANCHOR_WEIGHT,
        }
    }
}

impl MomentumConfig {
    /// Keep only the latest `sprints` sprints.
    pub fn window(mut self, sprints: usize) -> Self {
        assert!(sprints > 0, "window must be positive");
        self.window = Some(sprints);
        self
    }

    /// Set the per-sprint decay.
    pub fn decay(mut self, decay: f64) -> Self {
        assert!(decay > 0.0 && decay <= 1.0, "decay must be in (0, 1]");
        self.decay = decay;
        self
    }

    /// Set the anchor weight.
    pub fn anchor_weight(mut self, weight: f64) -> Self {
        assert!((0.0..=1.0).contains(&weight), "anchor_weight must be in [0, 1]");
        self.anchor_weight = weight;
        self
    }
}

/// Lognormal capacity forecast for upcoming sprints.
#[derive(Debug, Clone)]
pub struct MomentumModel {
    dist: LogNormal,
    target: f64,
    retained: usize,
}

impl MomentumModel {
    /// Fit with default settings. `history` is ordered oldest first.
    pub fn fit(history: &[f64], target_hours: f64) -> Result<Self> {
        Self::fit_with(history, target_hours, &MomentumConfig::default())
    }

    /// Fit with explicit settings.
    ///
    /// # Errors
    ///
    /// - [`Error::Data`] if `history` is empty.
    /// - [`Error::Validation`] if a sprint total or `target_hours` is not
    ///   positive.
    pub fn fit_with(history: &[f64], target_hours: f64, config: &MomentumConfig) -> Result<Self> {
        if !(target_hours.is_finite() && target_hours > 0.0) {
            return Err(Error::validation(
                "target_hours",
                format!("must be positive, got {target_hours}"),
            ));
        }
        let start = config
            .window
            .map_or(0, |w| history.len().saturating_sub(w));
        let recent = &history[start..];
        let moments = if config.decay == 1.0 {
            log_moments(recent)?
        } else {
            let weights: Vec<f64> = (0..recent.len())
                .map(|j| config.decay.powi((recent.len() - 1 - j) as i32))
                .collect();
            weighted_log_moments(recent, &weights)?
        };

        match moments.degeneracy() {
            Some(Degeneracy::SingleObservation) => {
                tracing::warn!(sprints = moments.n, "momentum fit holds a single sprint; forecast is degenerate")
            }
            Some(Degeneracy::ZeroVariance) => {
                tracing::warn!(sprints = moments.n, "momentum history has zero variance; forecast is degenerate")
            }
            None => {}
        }
        let mu = (1.0 - config.anchor_weight) * moments.mu + config.anchor_weight * target_hours.ln();
        tracing::debug!(mu, sigma = moments.sigma, retained = moments.n, target_hours, "fitted momentum model");

        Ok(Self {
            dist: LogNormal::new(mu, moments.sigma)?,
            target: target_hours,
            retained: moments.n,
        })
    }

    /// Log-space location after anchoring.
    pub fn mu(&self) -> f64 {
        self.dist.mu()
    }

    /// Log-space scale.
    pub fn sigma(&self) -> f64 {
        self.dist.sigma()
    }

    /// The anchor target in hours.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Sprints used in the fit.
    pub fn retained(&self) -> usize {
        self.retained
    }

    /// `n` capacity draws for upcoming sprints.
    pub fn forecast<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n).map(|_| self.dist.draw(rng)).collect()
    }
}

impl From<MomentumModel> for CapacityStrategy {
    fn from(model: MomentumModel) -> Self {
        CapacityStrategy::from(model.dist)
    }
}
