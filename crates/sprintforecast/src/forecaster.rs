//! Aggregate Monte Carlo forecaster.
//!
//! Each path draws one PERT effort per ticket, scales it by an execution
//! error `exp(e)`, sums the path, and divides by one capacity draw:
//!
//! ```text
//! completion = sprint_hours × Σ effort / capacity
//! ```

use sprintforecast_core::distribution::PertBatch;
use sprintforecast_core::rng::fill_rows;
use sprintforecast_core::{
    CapacityStrategy, Error, ExecutionStrategy, ForecastResult, ForecastSummary, RandomStream,
    Result, Ticket,
};

/// Forecasts completion time of a fixed ticket set against sprint capacity.
#[derive(Debug, Clone)]
pub struct SprintForecaster {
    tickets: Vec<Ticket>,
    batch: PertBatch,
    /// Ticket indices by ascending mean estimate.
    order: Vec<usize>,
    execution: ExecutionStrategy,
    capacity: CapacityStrategy,
}

/// One simulate call's sample buffer.
///
/// Row-major, `paths` rows of `tickets + 1` cells: the noisy effort of every
/// ticket followed by the path's capacity draw.
#[derive(Debug, Clone)]
pub struct SimulationBatch {
    cells: Vec<f64>,
    tickets: usize,
}

impl SimulationBatch {
    /// Number of paths.
    pub fn paths(&self) -> usize {
        self.cells.len() / (self.tickets + 1)
    }

    /// Number of tickets per path.
    pub fn tickets(&self) -> usize {
        self.tickets
    }

    /// Per-ticket effort of path `i`.
    pub fn effort(&self, i: usize) -> &[f64] {
        let start = i * (self.tickets + 1);
        &self.cells[start..start + self.tickets]
    }

    /// Capacity draw of path `i`.
    pub fn capacity(&self, i: usize) -> f64 {
        self.cells[i * (self.tickets + 1) + self.tickets]
    }

    /// Total effort of path `i`.
    pub fn total_effort(&self, i: usize) -> f64 {
        self.effort(i).iter().sum()
    }

    /// Completion time of every path for a sprint of `sprint_hours`.
    pub fn completion_times(&self, sprint_hours: f64) -> Vec<f64> {
        (0..self.paths())
            .map(|i| sprint_hours * self.total_effort(i) / self.capacity(i))
            .collect()
    }
}

impl SprintForecaster {
    /// Build a forecaster over `tickets`.
    ///
    /// # Errors
    ///
    /// - [`Error::Data`] if `tickets` is empty.
    /// - [`Error::Validation`] if a ticket's triad is not strictly ordered.
    pub fn new(
        tickets: Vec<Ticket>,
        execution: ExecutionStrategy,
        capacity: CapacityStrategy,
    ) -> Result<Self> {
        if tickets.is_empty() {
            return Err(Error::data("no tickets to forecast"));
        }
        let batch = PertBatch::new(&tickets)?;
        let mut order: Vec<usize> = (0..tickets.len()).collect();
        order.sort_by(|&a, &b| tickets[a].mean().total_cmp(&tickets[b].mean()));
        Ok(Self {
            tickets,
            batch,
            order,
            execution,
            capacity,
        })
    }

    /// The committed tickets.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Draw the `paths × (tickets + 1)` sample buffer.
    ///
    /// Path `i` uses substream `i` of `stream`, so the batch is identical
    /// with or without the `parallel` feature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `paths < 1` or a ticket fails
    /// re-validation.
    pub fn simulate_batch(&self, paths: usize, stream: &RandomStream) -> Result<SimulationBatch> {
        if paths < 1 {
            return Err(Error::validation("paths", format!("must be >= 1, got {paths}")));
        }
        for ticket in &self.tickets {
            ticket.validate()?;
        }

        let n = self.tickets.len();
        tracing::debug!(paths, tickets = n, seed = stream.seed(), "simulating sprint paths");

        let mut cells = vec![0.0; paths * (n + 1)];
        fill_rows(&mut cells, n + 1, stream, |rng, row| {
            let (effort, capacity) = row.split_at_mut(n);
            self.batch.fill_row(rng, effort);
            for e in effort.iter_mut() {
                *e = self.execution.apply(*e, rng);
            }
            capacity[0] = self.capacity.draw(rng);
        });

        Ok(SimulationBatch { cells, tickets: n })
    }

    /// Simulated completion times, one per path.
    ///
    /// # Errors
    ///
    /// As [`simulate_batch`](Self::simulate_batch), plus
    /// [`Error::Validation`] if `sprint_hours` is not positive.
    pub fn simulate(
        &self,
        sprint_hours: f64,
        paths: usize,
        stream: &RandomStream,
    ) -> Result<Vec<f64>> {
        check_sprint_hours(sprint_hours)?;
        Ok(self.simulate_batch(paths, stream)?.completion_times(sprint_hours))
    }

    /// Percentiles, deadline probability and scores of `paths` simulations.
    pub fn summary(
        &self,
        sprint_hours: f64,
        paths: usize,
        stream: &RandomStream,
    ) -> Result<ForecastSummary> {
        let summary = ForecastSummary::from_samples(self.simulate(sprint_hours, paths, stream)?, sprint_hours)?;
        tracing::debug!(
            p50 = summary.p50,
            p_goal = summary.p_goal,
            crps = summary.crps,
            "forecast summary"
        );
        Ok(summary)
    }

    /// Deadline probability and expected carry-over.
    ///
    /// Within a path, tickets finish in shortest-expected-job-first order at
    /// `sprint_hours × cumulative effort / capacity`; every ticket finishing
    /// after `sprint_hours` is carried over.
    pub fn forecast(
        &self,
        sprint_hours: f64,
        paths: usize,
        stream: &RandomStream,
    ) -> Result<ForecastResult> {
        check_sprint_hours(sprint_hours)?;
        let batch = self.simulate_batch(paths, stream)?;

        let mut met = Vec::with_capacity(paths);
        let mut carried = Vec::with_capacity(paths);
        for i in 0..batch.paths() {
            let effort = batch.effort(i);
            let capacity = batch.capacity(i);
            let mut cumulative = 0.0;
            let mut late = 0;
            for &t in &self.order {
                cumulative += effort[t];
                if sprint_hours * cumulative / capacity > sprint_hours {
                    late += 1;
                }
            }
            met.push(late == 0);
            carried.push(late);
        }
        Ok(ForecastResult::from_paths(&met, &carried))
    }
}

fn check_sprint_hours(sprint_hours: f64) -> Result<()> {
    if !(sprint_hours.is_finite() && sprint_hours > 0.0) {
        return Err(Error::validation(
            "sprint_hours",
            format!("must be positive, got {sprint_hours}"),
        ));
    }
    Ok(())
}
