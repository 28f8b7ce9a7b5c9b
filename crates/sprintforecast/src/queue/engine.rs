//! Forecast engines over per-ticket durations.

use rand::Rng;

use sprintforecast_core::{Error, ForecastResult, RandomStream, Result};

use super::{map_paths, QueueSimulator};

/// Anything that turns a number of draws into a deadline forecast.
pub trait ForecastEngine {
    /// Forecast over `draws` simulated paths.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if `draws < 1`; engine-specific errors otherwise.
    fn forecast(&self, draws: usize) -> Result<ForecastResult>;
}

/// [`QueueSimulator`] bound to a deadline and a random stream.
#[derive(Debug, Clone)]
pub struct QueueForecastEngine {
    simulator: QueueSimulator,
    remaining_hours: f64,
    stream: RandomStream,
}

impl QueueForecastEngine {
    /// Bind `simulator` to `remaining_hours` and `stream`.
    pub fn new(simulator: QueueSimulator, remaining_hours: f64, stream: RandomStream) -> Self {
        Self {
            simulator,
            remaining_hours,
            stream,
        }
    }

    /// The underlying simulator.
    pub fn simulator(&self) -> &QueueSimulator {
        &self.simulator
    }
}

impl ForecastEngine for QueueForecastEngine {
    fn forecast(&self, draws: usize) -> Result<ForecastResult> {
        self.simulator.forecast(self.remaining_hours, draws, &self.stream)
    }
}

/// Bootstrap over observed per-ticket durations, assuming every ticket runs
/// in parallel so a path's makespan is its longest duration.
///
/// With a single draw the observed durations are used as they are; with more,
/// each draw resamples as many durations as were observed, with replacement.
#[derive(Debug, Clone)]
pub struct EmpiricalEngine {
    durations: Vec<f64>,
    remaining_hours: f64,
    stream: RandomStream,
}

impl EmpiricalEngine {
    /// Build an engine over observed `durations` in hours.
    ///
    /// An empty pool is accepted here and reported by
    /// [`forecast`](ForecastEngine::forecast).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a duration is negative or not finite,
    /// or `remaining_hours` is not positive.
    pub fn new(durations: Vec<f64>, remaining_hours: f64, stream: RandomStream) -> Result<Self> {
        if let Some(bad) = durations.iter().find(|d| !(d.is_finite() && **d >= 0.0)) {
            return Err(Error::validation(
                "durations",
                format!("must be finite and non-negative, got {bad}"),
            ));
        }
        if !(remaining_hours.is_finite() && remaining_hours > 0.0) {
            return Err(Error::validation(
                "remaining_hours",
                format!("must be positive, got {remaining_hours}"),
            ));
        }
        Ok(Self {
            durations,
            remaining_hours,
            stream,
        })
    }

    fn score(&self, sample: impl Iterator<Item = f64>) -> (bool, usize) {
        let mut span = 0.0f64;
        let mut carried = 0;
        for d in sample {
            span = span.max(d);
            if d > self.remaining_hours {
                carried += 1;
            }
        }
        (span <= self.remaining_hours, carried)
    }
}

impl ForecastEngine for EmpiricalEngine {
    fn forecast(&self, draws: usize) -> Result<ForecastResult> {
        if self.durations.is_empty() {
            return Err(Error::data("no observed durations to resample"));
        }
        if draws < 1 {
            return Err(Error::validation("draws", format!("must be >= 1, got {draws}")));
        }
        tracing::debug!(
            draws,
            pool = self.durations.len(),
            seed = self.stream.seed(),
            "bootstrapping observed durations"
        );

        let outcomes = if draws == 1 {
            vec![self.score(self.durations.iter().copied())]
        } else {
            let n = self.durations.len();
            map_paths(draws, &self.stream, |rng| {
                self.score((0..n).map(|_| self.durations[rng.random_range(0..n)]))
            })
        };

        let met: Vec<bool> = outcomes.iter().map(|o| o.0).collect();
        let carried: Vec<usize> = outcomes.iter().map(|o| o.1).collect();
        Ok(ForecastResult::from_paths(&met, &carried))
    }
}
