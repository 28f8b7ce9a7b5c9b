//! Role wrappers that fix how a [`Distribution`] composes with effort.
//!
//! | Strategy | Composition |
//! |----------|-------------|
//! | [`ExecutionStrategy`] | multiplicative in log space: `effort = base × exp(e)` |
//! | [`ReviewStrategy`] | additive: a non-negative review lag follows the dev stage |
//! | [`CapacityStrategy`] | positive capacity draws per sprint |
//!
//! Each wrapper checks at construction that its distribution can be
//! sampled, so the draw methods are infallible.

use rand::Rng;

use crate::capacity::CapacityPosterior;
use crate::constants::MAX_LOG_ERROR;
use crate::distribution::{Distribution, Empirical, LogNormal};
use crate::error::{Error, Result};

/// Execution noise applied to a ticket's base PERT effort.
///
/// Every variant's sample is used as the log-error `e` directly, so a
/// lognormal model contributes `exp(Normal(mu, sigma))` as `e` and a
/// degenerate `LogNormal(0, 0)` scales effort by `exp(1)`.
#[derive(Debug, Clone)]
pub struct ExecutionStrategy {
    dist: Distribution,
}

impl ExecutionStrategy {
    /// Wrap `dist`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Data`] if `dist` is an empty empirical pool.
    pub fn new(dist: impl Into<Distribution>) -> Result<Self> {
        let dist = dist.into();
        dist.ensure_sampleable()?;
        Ok(Self { dist })
    }

    /// The wrapped distribution.
    pub fn distribution(&self) -> &Distribution {
        &self.dist
    }

    /// One log-space error, clamped to `±MAX_LOG_ERROR`.
    #[inline]
    pub fn draw_log_error<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.dist.draw(rng).clamp(-MAX_LOG_ERROR, MAX_LOG_ERROR)
    }

    /// Apply one error draw to `base`: `base × exp(e)`.
    #[inline]
    pub fn apply<R: Rng + ?Sized>(&self, base: f64, rng: &mut R) -> f64 {
        base * self.draw_log_error(rng).exp()
    }
}

/// Review lag appended after the dev stage.
#[derive(Debug, Clone)]
pub struct ReviewStrategy {
    dist: Distribution,
}

impl ReviewStrategy {
    /// Wrap `dist`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Data`] if `dist` is an empty empirical pool.
    pub fn new(dist: impl Into<Distribution>) -> Result<Self> {
        let dist = dist.into();
        dist.ensure_sampleable()?;
        Ok(Self { dist })
    }

    /// The wrapped distribution.
    pub fn distribution(&self) -> &Distribution {
        &self.dist
    }

    /// One review lag in hours; negative draws are floored at zero.
    #[inline]
    pub fn draw_lag<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.dist.draw(rng).max(0.0)
    }

    /// Additive composition: `base + lag`.
    #[inline]
    pub fn apply<R: Rng + ?Sized>(&self, base: f64, rng: &mut R) -> f64 {
        base + self.draw_lag(rng)
    }
}

/// Per-sprint team capacity in hours.
#[derive(Debug, Clone)]
pub struct CapacityStrategy {
    dist: Distribution,
}

impl CapacityStrategy {
    /// Wrap `dist`.
    ///
    /// # Errors
    ///
    /// - [`Error::Data`] if `dist` is an empty empirical pool.
    /// - [`Error::Validation`] if `dist` can produce non-positive capacity
    ///   (skew-t, a beta with `low <= 0`, or a pool with a non-positive value).
    pub fn new(dist: impl Into<Distribution>) -> Result<Self> {
        let dist = dist.into();
        dist.ensure_sampleable()?;
        if dist.lower_support() <= 0.0 && !matches!(dist, Distribution::LogNormal(_)) {
            return Err(Error::validation(
                "capacity",
                format!("{} capacity model can produce non-positive capacity", dist.tag()),
            ));
        }
        Ok(Self { dist })
    }

    /// The wrapped distribution.
    pub fn distribution(&self) -> &Distribution {
        &self.dist
    }

    /// One capacity draw, strictly positive.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.dist.draw(rng).max(f64::MIN_POSITIVE)
    }

    /// `n` capacity draws.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}

impl From<CapacityPosterior> for CapacityStrategy {
    fn from(posterior: CapacityPosterior) -> Self {
        Self {
            dist: Distribution::LogNormal(posterior.into_lognormal()),
        }
    }
}

impl From<LogNormal> for CapacityStrategy {
    fn from(d: LogNormal) -> Self {
        Self {
            dist: Distribution::LogNormal(d),
        }
    }
}

/// Build the three strategies from observed history.
///
/// - execution: empirical log-errors `ln(dev / mean(dev))`
/// - review: empirical review hours
/// - capacity: empirical per-sprint capacities
///
/// # Errors
///
/// - [`Error::Data`] if any input is empty.
/// - [`Error::Validation`] if a dev duration or capacity is not positive.
pub fn build_strategies(
    dev_hours: &[f64],
    review_hours: &[f64],
    sprint_caps: &[f64],
) -> Result<(ExecutionStrategy, ReviewStrategy, CapacityStrategy)> {
    check_stage_history(dev_hours, review_hours)?;
    if sprint_caps.is_empty() {
        return Err(Error::data("no historical sprint capacities"));
    }
    let (execution, review) = build_queue_strategies(dev_hours, review_hours)?;
    Ok((
        execution,
        review,
        CapacityStrategy::new(Empirical::new(sprint_caps.to_vec())?)?,
    ))
}

/// The execution and review strategies of [`build_strategies`], for the
/// queue simulation, which takes no capacity model.
///
/// # Errors
///
/// - [`Error::Data`] if either input is empty.
/// - [`Error::Validation`] if a dev duration is not positive.
pub fn build_queue_strategies(
    dev_hours: &[f64],
    review_hours: &[f64],
) -> Result<(ExecutionStrategy, ReviewStrategy)> {
    check_stage_history(dev_hours, review_hours)?;
    if let Some(bad) = dev_hours.iter().find(|&&d| !(d.is_finite() && d > 0.0)) {
        return Err(Error::validation("dev_hours", format!("durations must be positive, got {bad}")));
    }

    let mean = dev_hours.iter().sum::<f64>() / dev_hours.len() as f64;
    let log_errors = dev_hours.iter().map(|d| (d / mean).ln()).collect();

    Ok((
        ExecutionStrategy::new(Empirical::new(log_errors)?)?,
        ReviewStrategy::new(Empirical::new(review_hours.to_vec())?)?,
    ))
}

fn check_stage_history(dev_hours: &[f64], review_hours: &[f64]) -> Result<()> {
    if dev_hours.is_empty() {
        return Err(Error::data("no dev durations to fit execution error"));
    }
    if review_hours.is_empty() {
        return Err(Error::data("no review durations"));
    }
    Ok(())
}
