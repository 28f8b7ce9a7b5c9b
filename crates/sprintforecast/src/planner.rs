//! Greedy shortest-job-first intake planning.

use std::collections::BTreeMap;

use sprintforecast_core::statistics::{compute_quantile_sorted, sort_samples};
use sprintforecast_core::{Error, IntakePlan, PlannedTicket, Result, SizeBucket, TriadRecord};

/// Picks the tickets a team can commit to at a given confidence.
///
/// Candidates are taken in ascending mean estimate and accumulated while the
/// running total stays within the `confidence` quantile of the capacity
/// forecast. The first ticket that would overflow ends the plan. Tickets in
/// the largest size bucket are never selected; they are listed as oversized.
#[derive(Debug, Clone)]
pub struct IntakePlanner {
    backlog: Vec<TriadRecord>,
    capacity: Vec<f64>,
}

impl IntakePlanner {
    /// Plan against a sampled capacity forecast.
    ///
    /// # Errors
    ///
    /// - [`Error::Data`] if `capacity_forecast` is empty.
    /// - [`Error::Validation`] if a capacity draw is not finite.
    pub fn new(backlog: Vec<TriadRecord>, mut capacity_forecast: Vec<f64>) -> Result<Self> {
        if capacity_forecast.is_empty() {
            return Err(Error::data("no capacity forecast to plan against"));
        }
        if let Some(bad) = capacity_forecast.iter().find(|c| !c.is_finite()) {
            return Err(Error::validation("capacity", format!("draws must be finite, got {bad}")));
        }
        sort_samples(&mut capacity_forecast);
        Ok(Self {
            backlog,
            capacity: capacity_forecast,
        })
    }

    /// Plan against a fixed team capacity of
    /// `team × sprint_days × hours_per_dev_day`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any factor is not positive.
    pub fn with_fixed_capacity(
        backlog: Vec<TriadRecord>,
        team: usize,
        sprint_days: f64,
        hours_per_dev_day: f64,
    ) -> Result<Self> {
        if team == 0 {
            return Err(Error::validation("team", "must be >= 1"));
        }
        let capacity = team as f64 * sprint_days * hours_per_dev_day;
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(Error::validation(
                "capacity",
                format!("sprint days and hours per day must be positive, got {sprint_days} × {hours_per_dev_day}"),
            ));
        }
        Self::new(backlog, vec![capacity])
    }

    /// Capacity bound at `confidence`.
    pub fn capacity_bound(&self, confidence: f64) -> f64 {
        compute_quantile_sorted(&self.capacity, confidence)
    }

    /// Select the intake at `confidence`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `confidence` is outside [0, 1].
    pub fn plan(&self, confidence: f64) -> Result<IntakePlan> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::validation(
                "confidence",
                format!("must be in [0, 1], got {confidence}"),
            ));
        }
        let bound = self.capacity_bound(confidence);

        let mut candidates: Vec<&TriadRecord> = self.backlog.iter().collect();
        candidates.sort_by(|a, b| {
            a.ticket
                .mean()
                .total_cmp(&b.ticket.mean())
                .then_with(|| a.number().cmp(&b.number()))
        });

        let oversized: Vec<_> = candidates
            .iter()
            .filter(|r| r.ticket.size() == SizeBucket::LARGEST)
            .map(|r| r.number())
            .collect();

        let mut selected = Vec::new();
        let mut committed = 0.0;
        for record in candidates {
            let size = record.ticket.size();
            if size == SizeBucket::LARGEST {
                continue;
            }
            let hours = record.ticket.mean();
            if committed + hours > bound {
                break;
            }
            committed += hours;
            selected.push(PlannedTicket {
                number: record.number(),
                title: record.title.clone(),
                hours,
                size,
            });
            if committed >= bound {
                break;
            }
        }

        let mut size_mix: BTreeMap<SizeBucket, f64> = BTreeMap::new();
        for t in &selected {
            *size_mix.entry(t.size).or_insert(0.0) += t.hours / committed;
        }

        tracing::info!(
            selected = selected.len(),
            committed_hours = committed,
            capacity_bound = bound,
            confidence,
            oversized = oversized.len(),
            "intake plan"
        );

        Ok(IntakePlan {
            size_mix,
            selected,
            committed_hours: committed,
            capacity_bound: bound,
            confidence,
            oversized,
        })
    }
}
