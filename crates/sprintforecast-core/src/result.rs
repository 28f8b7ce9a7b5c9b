//! Forecast and plan result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::SUMMARY_PERCENTILES;
use crate::error::{ensure_count, Error, Result};
use crate::scoring::{brier_self, crps_sorted};
use crate::size::SizeBucket;
use crate::statistics::{compute_quantiles_sorted, sort_samples};
use crate::ticket::TicketId;

/// Probability of finishing and expected carry-over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Fraction of simulated paths that meet the deadline, in [0, 1].
    pub probability: f64,
    /// Mean count of tickets not finished by the deadline, >= 0.
    pub expected_carry: f64,
    /// Number of simulated paths behind the estimate.
    pub draws: usize,
}

impl ForecastResult {
    /// Aggregate per-path outcomes.
    ///
    /// `met[i]` says whether path `i` met the deadline and `carried[i]` how
    /// many tickets it left unfinished.
    pub fn from_paths(met: &[bool], carried: &[usize]) -> Self {
        debug_assert_eq!(met.len(), carried.len());
        let n = met.len().max(1) as f64;
        Self {
            probability: met.iter().filter(|&&m| m).count() as f64 / n,
            expected_carry: carried.iter().sum::<usize>() as f64 / n,
            draws: met.len(),
        }
    }
}

/// Summary statistics and scores of simulated completion times.
///
/// Serialized keys follow the conventional report names: `p50`, `p80`,
/// `p95`, `P_goal`, `Brier`, `CRPS`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// Median completion time (hours).
    pub p50: f64,
    /// 80th percentile completion time.
    pub p80: f64,
    /// 95th percentile completion time.
    pub p95: f64,
    /// Fraction of paths finishing within the sprint.
    #[serde(rename = "P_goal")]
    pub p_goal: f64,
    /// Expected Brier score of `p_goal`, `p (1 − p)`.
    #[serde(rename = "Brier")]
    pub brier: f64,
    /// Closed-form CRPS spread of the completion-time ensemble.
    #[serde(rename = "CRPS")]
    pub crps: f64,
}

impl ForecastSummary {
    /// Summarize completion-time samples against a deadline of `sprint_hours`.
    ///
    /// Takes ownership so the samples can be sorted in place once; percentiles
    /// and CRPS are both read off the same sorted buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `samples` is empty.
    /// - [`Error::Data`] if any sample is not finite.
    pub fn from_samples(mut samples: Vec<f64>, sprint_hours: f64) -> Result<Self> {
        ensure_count("paths", samples.len())?;
        if let Some(bad) = samples.iter().find(|x| !x.is_finite()) {
            return Err(Error::data(format!("non-finite completion time {bad} in simulation")));
        }

        let n = samples.len() as f64;
        let p_goal = samples.iter().filter(|&&t| t <= sprint_hours).count() as f64 / n;

        sort_samples(&mut samples);
        let q = compute_quantiles_sorted(&samples, &SUMMARY_PERCENTILES);

        Ok(Self {
            p50: q[0],
            p80: q[1],
            p95: q[2],
            p_goal,
            brier: brier_self(p_goal),
            crps: crps_sorted(&samples),
        })
    }
}

/// A ticket selected for intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedTicket {
    /// Issue number.
    pub number: TicketId,
    /// Issue title (empty when unknown).
    pub title: String,
    /// Mean PERT estimate in hours.
    pub hours: f64,
    /// Size class of `hours`.
    pub size: SizeBucket,
}

/// Recommended ticket mix for the next sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakePlan {
    /// Share of committed hours per size bucket, for buckets with at least
    /// one selected ticket. Sums to 1 for a non-empty plan.
    pub size_mix: BTreeMap<SizeBucket, f64>,
    /// Selected tickets, shortest first.
    pub selected: Vec<PlannedTicket>,
    /// Sum of selected mean estimates (hours).
    pub committed_hours: f64,
    /// Capacity quantile the plan is bounded by (hours).
    pub capacity_bound: f64,
    /// Confidence level used for the bound.
    pub confidence: f64,
    /// Tickets skipped for being in the largest size bucket.
    pub oversized: Vec<TicketId>,
}
