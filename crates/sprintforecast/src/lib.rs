//! Sprint completion forecasting.
//!
//! Turns three-point ticket estimates and historical team capacity into a
//! probability of finishing on time, an expected carry-over count,
//! calibration scores and an intake recommendation for the next sprint.
//!
//! The numerical model lives in [`sprintforecast_core`]; this crate wires it
//! together:
//!
//! - [`SprintForecaster`]: batched Monte Carlo over PERT effort, execution
//!   noise and capacity draws
//! - [`QueueSimulator`]: discrete-event dev → review flow over a worker pool,
//!   behind the [`ForecastEngine`] capability together with
//!   [`EmpiricalEngine`]
//! - [`MomentumModel`] and [`IntakePlanner`]: capacity projection and greedy
//!   shortest-job-first intake
//! - [`sources`]: interfaces to the issue tracker and history, with
//!   file-backed implementations
//! - [`output`]: JSON and terminal rendering
//!
//! # Example
//!
//! ```ignore
//! use sprintforecast::{
//!     distribution::LogNormal, CapacityStrategy, ExecutionStrategy, RandomStream,
//!     SprintForecaster, Ticket,
//! };
//!
//! let tickets = vec![
//!     Ticket::new(1, 1.0, 2.0, 3.0)?,
//!     Ticket::new(2, 2.0, 3.0, 4.0)?,
//! ];
//! let forecaster = SprintForecaster::new(
//!     tickets,
//!     ExecutionStrategy::new(LogNormal::new(0.0, 0.1)?)?,
//!     CapacityStrategy::new(LogNormal::new(0.0, 0.1)?)?,
//! )?;
//! let summary = forecaster.summary(4.0, 10_000, &RandomStream::new(7))?;
//! println!("{}", sprintforecast::output::format_summary(&summary));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod forecaster;
pub mod momentum;
pub mod output;
pub mod planner;
pub mod queue;
pub mod sources;

pub use sprintforecast_core::{
    capacity, constants, distribution, rng, scoring, size, statistics, strategy, ticket,
};
pub use sprintforecast_core::{
    build_queue_strategies, build_strategies, CapacityPosterior, CapacityStrategy, Error, ErrorKind,
    ExecutionStrategy, ForecastResult, ForecastSummary, IntakePlan, PlannedTicket, RandomStream,
    Result, ReviewStrategy, SizeBucket, Ticket, TicketId, TriadRecord,
};

pub use config::{parse_distribution_config, ReviewPool, RunConfig};
pub use forecaster::{SimulationBatch, SprintForecaster};
pub use momentum::{MomentumConfig, MomentumModel};
pub use planner::IntakePlanner;
pub use queue::{EmpiricalEngine, ForecastEngine, QueueForecastEngine, QueueSimulator};
