//! Run configuration.

use serde::{Deserialize, Serialize};

use sprintforecast_core::constants::{
    DEFAULT_CONFIDENCE, DEFAULT_DRAWS, DEFAULT_HORIZON_FACTOR, DEFAULT_HOURS_PER_DEV_DAY,
    DEFAULT_PATHS, DEFAULT_SEED, DEFAULT_WORKERS,
};
use sprintforecast_core::distribution::{Distribution, DistributionConfig};
use sprintforecast_core::{Error, RandomStream, Result};

/// Who performs the review stage in the queue simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPool {
    /// Reviews take a slot from the same worker pool as development.
    #[default]
    Shared,
    /// A separate pool of this many reviewers.
    Dedicated(usize),
}

/// Settings for one forecast or plan invocation.
///
/// Setters panic on out-of-range values; call-time inputs such as ticket
/// sets are checked by the operations themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Monte Carlo paths for the aggregate forecaster. Default: 10 000.
    pub paths: usize,

    /// Simulated paths for queue and empirical engines. Default: 2 000.
    pub draws: usize,

    /// Size of the development worker pool. Default: 3.
    pub workers: usize,

    /// Review staffing. Default: [`ReviewPool::Shared`].
    pub review_pool: ReviewPool,

    /// Queue horizon as a multiple of the remaining hours. Default: 10.
    pub horizon_factor: f64,

    /// Explicit queue horizon in hours, overriding `horizon_factor`.
    pub horizon: Option<f64>,

    /// Root seed of the random stream.
    pub seed: u64,

    /// Confidence level for intake planning. Default: 0.8.
    pub confidence: f64,

    /// Focused hours per developer per sprint day. Default: 6.
    pub hours_per_dev_day: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            paths: DEFAULT_PATHS,
            draws: DEFAULT_DRAWS,
            workers: DEFAULT_WORKERS,
            review_pool: ReviewPool::Shared,
            horizon_factor: DEFAULT_HORIZON_FACTOR,
            horizon: None,
            seed: DEFAULT_SEED,
            confidence: DEFAULT_CONFIDENCE,
            hours_per_dev_day: DEFAULT_HOURS_PER_DEV_DAY,
        }
    }
}

impl RunConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A small run for smoke tests: 1 000 paths, 200 draws.
    pub fn quick() -> Self {
        Self {
            paths: 1_000,
            draws: 200,
            ..Self::default()
        }
    }

    /// Set the number of Monte Carlo paths.
    pub fn paths(mut self, paths: usize) -> Self {
        assert!(paths > 0, "paths must be positive");
        self.paths = paths;
        self
    }

    /// Set the number of queue/empirical draws.
    pub fn draws(mut self, draws: usize) -> Self {
        assert!(draws > 0, "draws must be positive");
        self.draws = draws;
        self
    }

    /// Set the worker pool size.
    pub fn workers(mut self, workers: usize) -> Self {
        assert!(workers > 0, "workers must be positive");
        self.workers = workers;
        self
    }

    /// Set the review staffing.
    pub fn review_pool(mut self, pool: ReviewPool) -> Self {
        if let ReviewPool::Dedicated(n) = pool {
            assert!(n > 0, "review_pool must have at least one reviewer");
        }
        self.review_pool = pool;
        self
    }

    /// Set the queue horizon as a multiple of the remaining hours.
    pub fn horizon_factor(mut self, factor: f64) -> Self {
        assert!(factor.is_finite() && factor >= 1.0, "horizon_factor must be >= 1");
        self.horizon_factor = factor;
        self
    }

    /// Set an explicit queue horizon in hours.
    pub fn horizon(mut self, hours: f64) -> Self {
        assert!(hours.is_finite() && hours > 0.0, "horizon must be positive");
        self.horizon = Some(hours);
        self
    }

    /// Set the root seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the intake confidence level.
    pub fn confidence(mut self, confidence: f64) -> Self {
        assert!((0.0..=1.0).contains(&confidence), "confidence must be in [0, 1]");
        self.confidence = confidence;
        self
    }

    /// Set focused hours per developer per day.
    pub fn hours_per_dev_day(mut self, hours: f64) -> Self {
        assert!(hours.is_finite() && hours > 0.0, "hours_per_dev_day must be positive");
        self.hours_per_dev_day = hours;
        self
    }

    /// The random stream rooted at `seed`.
    pub fn stream(&self) -> RandomStream {
        RandomStream::new(self.seed)
    }

    /// Queue horizon for a run with `remaining_hours` left.
    pub fn horizon_for(&self, remaining_hours: f64) -> f64 {
        self.horizon.unwrap_or(remaining_hours * self.horizon_factor)
    }

    /// Check the invariants the setters enforce, for configs built by struct
    /// literal.
    pub fn validate(&self) -> Result<()> {
        if self.paths == 0 {
            return Err(Error::validation("paths", "must be >= 1"));
        }
        if self.draws == 0 {
            return Err(Error::validation("draws", "must be >= 1"));
        }
        if self.workers == 0 {
            return Err(Error::validation("workers", "must be >= 1"));
        }
        if self.review_pool == ReviewPool::Dedicated(0) {
            return Err(Error::validation("review_pool", "must have at least one reviewer"));
        }
        if !(self.horizon_factor.is_finite() && self.horizon_factor >= 1.0) {
            return Err(Error::validation("horizon_factor", "must be >= 1"));
        }
        if let Some(h) = self.horizon {
            if !(h.is_finite() && h > 0.0) {
                return Err(Error::validation("horizon", "must be positive"));
            }
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(Error::validation("confidence", "must be in [0, 1]"));
        }
        if !(self.hours_per_dev_day.is_finite() && self.hours_per_dev_day > 0.0) {
            return Err(Error::validation("hours_per_dev_day", "must be positive"));
        }
        Ok(())
    }
}

/// Parse a `{"type": ..., "params": {...}}` record into a [`Distribution`].
///
/// # Errors
///
/// Returns [`Error::Validation`] for malformed JSON, an unknown tag, a missing
/// or ill-typed parameter, or an out-of-domain parameter value.
pub fn parse_distribution_config(json: &str) -> Result<Distribution> {
    let config: DistributionConfig = serde_json::from_str(json)
        .map_err(|e| Error::validation("distribution", e.to_string()))?;
    Distribution::from_config(&config)
}
