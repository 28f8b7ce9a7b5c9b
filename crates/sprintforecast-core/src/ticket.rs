//! Committed work items and their three-point estimates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::size::SizeBucket;

/// Issue number identifying a ticket.
pub type TicketId = u64;

/// A work item with an optimistic / most-likely / pessimistic effort estimate in hours.
///
/// The triad is strictly ordered (`optimistic < mode < pessimistic`) and
/// all three values are positive and finite. A ticket that violates this is
/// never constructed; there is no silent coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    number: TicketId,
    optimistic: f64,
    mode: f64,
    pessimistic: f64,
    dependencies: BTreeSet<TicketId>,
}

impl Ticket {
    /// Create a ticket with no dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] unless `0 < optimistic < mode < pessimistic`
    /// with all values finite.
    pub fn new(number: TicketId, optimistic: f64, mode: f64, pessimistic: f64) -> Result<Self> {
        check_triad(optimistic, mode, pessimistic)?;
        Ok(Self {
            number,
            optimistic,
            mode,
            pessimistic,
            dependencies: BTreeSet::new(),
        })
    }

    /// Attach the ids of tickets that must finish before this one can start.
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = TicketId>) -> Self {
        self.dependencies.extend(deps);
        self
    }

    /// Issue number.
    pub fn number(&self) -> TicketId {
        self.number
    }

    /// Optimistic estimate (lower bound).
    pub fn optimistic(&self) -> f64 {
        self.optimistic
    }

    /// Most-likely estimate.
    pub fn mode(&self) -> f64 {
        self.mode
    }

    /// Pessimistic estimate (upper bound).
    pub fn pessimistic(&self) -> f64 {
        self.pessimistic
    }

    /// Ids of prerequisite tickets.
    pub fn dependencies(&self) -> &BTreeSet<TicketId> {
        &self.dependencies
    }

    /// Re-check the ordering invariant.
    pub fn validate(&self) -> Result<()> {
        check_triad(self.optimistic, self.mode, self.pessimistic)
    }

    /// Beta(a, b) shape parameters from the standard PERT formulas:
    ///
    /// ```text
    /// a = 1 + 4 (mode − optimistic) / (pessimistic − optimistic)
    /// b = 1 + 4 (pessimistic − mode) / (pessimistic − optimistic)
    /// ```
    pub fn beta_params(&self) -> (f64, f64) {
        let range = self.pessimistic - self.optimistic;
        let a = 1.0 + 4.0 * (self.mode - self.optimistic) / range;
        let b = 1.0 + 4.0 * (self.pessimistic - self.mode) / range;
        (a, b)
    }

    /// Mean of the Beta-PERT distribution, `(o + 4m + p) / 6`.
    pub fn mean(&self) -> f64 {
        (self.optimistic + 4.0 * self.mode + self.pessimistic) / 6.0
    }

    /// Size classification of the mean estimate.
    pub fn size(&self) -> SizeBucket {
        SizeBucket::classify(self.mean())
    }
}

/// A ticket as delivered by an issue tracker: number, title and triad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriadRecord {
    /// Issue title.
    pub title: String,
    /// The validated estimate.
    pub ticket: Ticket,
}

impl TriadRecord {
    /// Pair a title with a ticket.
    pub fn new(title: impl Into<String>, ticket: Ticket) -> Self {
        Self {
            title: title.into(),
            ticket,
        }
    }

    /// Issue number of the ticket.
    pub fn number(&self) -> TicketId {
        self.ticket.number()
    }
}

fn check_triad(optimistic: f64, mode: f64, pessimistic: f64) -> Result<()> {
    if !(optimistic.is_finite() && mode.is_finite() && pessimistic.is_finite()) {
        return Err(Error::validation("triad", "estimates must be finite"));
    }
    if optimistic <= 0.0 {
        return Err(Error::validation(
            "triad",
            format!("optimistic must be positive, got {optimistic}"),
        ));
    }
    if !(optimistic < mode && mode < pessimistic) {
        return Err(Error::validation(
            "triad",
            format!(
                "optimistic < mode < pessimistic must hold, got ({optimistic}, {mode}, {pessimistic})"
            ),
        ));
    }
    Ok(())
}

#[derive(Deserialize)]
struct RawTicket {
    number: TicketId,
    optimistic: f64,
    mode: f64,
    pessimistic: f64,
    #[serde(default)]
    dependencies: BTreeSet<TicketId>,
}

impl<'de> Deserialize<'de> for Ticket {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawTicket::deserialize(deserializer)?;
        Ticket::new(raw.number, raw.optimistic, raw.mode, raw.pessimistic)
            .map(|t| t.with_dependencies(raw.dependencies))
            .map_err(serde::de::Error::custom)
    }
}
