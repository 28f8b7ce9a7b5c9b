//! Core probabilistic model for sprint completion forecasts.
//!
//! This crate holds the numerical building blocks that the `sprintforecast`
//! crate orchestrates:
//! - Three-point (PERT) effort estimates and their Beta parameterization
//! - Error distributions for execution and review noise
//! - A lognormal capacity posterior fitted from historical sprint totals
//! - Reproducible random streams with per-path substreams
//! - Percentiles and proper scoring rules (CRPS, Brier)
//!
//! # Features
//!
//! - `parallel`: Run Monte Carlo paths on a rayon pool. Every path draws from
//!   its own counter-seeded substream, so results do not depend on the
//!   degree of parallelism.
//!
//! ```ignore
//! use sprintforecast_core::{
//!     distribution::{Distribution, PertBatch},
//!     rng::RandomStream,
//!     Ticket,
//! };
//!
//! let tickets = vec![Ticket::new(1, 1.0, 2.0, 3.0)?];
//! let batch = PertBatch::new(&tickets)?;
//! let effort = batch.sample_matrix(1_000, &RandomStream::new(7));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capacity;
pub mod constants;
pub mod distribution;
pub mod error;
pub mod result;
pub mod rng;
pub mod scoring;
pub mod size;
pub mod statistics;
pub mod strategy;
pub mod ticket;

pub use capacity::CapacityPosterior;
pub use error::{Error, ErrorKind, Result};
pub use result::{ForecastResult, ForecastSummary, IntakePlan, PlannedTicket};
pub use rng::RandomStream;
pub use size::SizeBucket;
pub use strategy::{
    build_queue_strategies, build_strategies, CapacityStrategy, ExecutionStrategy, ReviewStrategy,
};
pub use ticket::{Ticket, TicketId, TriadRecord};
