//! Interfaces to the systems that supply forecast inputs.
//!
//! The issue tracker, its timeline history and past sprint totals sit
//! outside the model. They are reached through the traits here so a
//! forecast never depends on how its inputs were fetched. Failures of a
//! source surface as [`Error::Upstream`](sprintforecast_core::Error::Upstream)
//! before any sampling starts.

mod files;
mod timeline;

pub use files::{
    load_capacity_history, load_distribution, load_timelines, load_triads, CapacityFile, SourceError,
    TimelineFile, TriadFile,
};
pub use timeline::{
    ColumnTransitionExtractor, LabelEventExtractor, TimelineEvent, TimelineEventKind,
};

use serde::{Deserialize, Serialize};

use sprintforecast_core::{Result, TicketId, TriadRecord};

/// Source of committed tickets with their estimates.
pub trait TriadSource {
    /// Every ticket in scope. An empty result is not an error here.
    fn fetch_triads(&self) -> Result<Vec<TriadRecord>>;
}

/// Source of an issue's event history.
pub trait TimelineSource {
    /// Events for `issue`, in any order. Unknown issues yield no events.
    fn timeline(&self, issue: TicketId) -> Result<Vec<TimelineEvent>>;
}

/// Source of past per-sprint capacity totals, oldest first.
pub trait CapacityHistorySource {
    /// Raw historical totals in hours.
    fn historical_capacity(&self) -> Result<Vec<f64>>;
}

/// Observed hours spent per stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageDurations {
    /// Development stage durations.
    pub dev: Vec<f64>,
    /// Review stage durations.
    pub review: Vec<f64>,
}

/// Derives stage durations from issue history.
pub trait DurationExtractor {
    /// Durations for `issue_numbers`. Issues missing an entry or exit
    /// event for a stage contribute nothing to that stage.
    fn extract(&self, issue_numbers: &[TicketId]) -> Result<StageDurations>;
}

impl<T: TriadSource + ?Sized> TriadSource for &T {
    fn fetch_triads(&self) -> Result<Vec<TriadRecord>> {
        (**self).fetch_triads()
    }
}

impl<T: TimelineSource + ?Sized> TimelineSource for &T {
    fn timeline(&self, issue: TicketId) -> Result<Vec<TimelineEvent>> {
        (**self).timeline(issue)
    }
}

impl<T: CapacityHistorySource + ?Sized> CapacityHistorySource for &T {
    fn historical_capacity(&self) -> Result<Vec<f64>> {
        (**self).historical_capacity()
    }
}
