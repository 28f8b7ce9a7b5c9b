//! Stage durations from issue timelines.
//!
//! Two ways of marking the dev and review stages are supported, as separate
//! extractors over the same [`TimelineSource`]:
//!
//! - [`ColumnTransitionExtractor`]: project board column moves. Entering the
//!   `dev` column starts the stage, leaving it ends it.
//! - [`LabelEventExtractor`]: the `dev` label being added then removed.
//!
//! For each issue the latest entry and latest exit are paired, and a stage
//! is recorded only when both exist and the exit does not precede the entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sprintforecast_core::{Result, TicketId};

use super::{DurationExtractor, StageDurations, TimelineSource};

/// One entry in an issue's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// When the event happened.
    pub created_at: DateTime<Utc>,
    /// What happened.
    #[serde(flatten)]
    pub kind: TimelineEventKind,
}

/// Event payloads relevant to stage extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimelineEventKind {
    /// The issue's card moved between board columns.
    MovedColumns {
        /// Column left, if any.
        #[serde(default)]
        from: Option<String>,
        /// Column entered, if any.
        #[serde(default)]
        to: Option<String>,
    },
    /// A label was added.
    Labeled {
        /// Label name.
        label: String,
    },
    /// A label was removed.
    Unlabeled {
        /// Label name.
        label: String,
    },
}

impl TimelineEvent {
    /// A column move at `at`.
    pub fn moved(at: DateTime<Utc>, from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            created_at: at,
            kind: TimelineEventKind::MovedColumns {
                from: from.map(str::to_owned),
                to: to.map(str::to_owned),
            },
        }
    }

    /// A label added at `at`.
    pub fn labeled(at: DateTime<Utc>, label: &str) -> Self {
        Self {
            created_at: at,
            kind: TimelineEventKind::Labeled {
                label: label.to_owned(),
            },
        }
    }

    /// A label removed at `at`.
    pub fn unlabeled(at: DateTime<Utc>, label: &str) -> Self {
        Self {
            created_at: at,
            kind: TimelineEventKind::Unlabeled {
                label: label.to_owned(),
            },
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Window {
    entered: Option<DateTime<Utc>>,
    exited: Option<DateTime<Utc>>,
}

impl Window {
    fn hours(&self) -> Option<f64> {
        let span = self.exited? - self.entered?;
        let hours = span.num_milliseconds() as f64 / 3_600_000.0;
        (hours >= 0.0).then_some(hours)
    }
}

#[derive(Debug, Default)]
struct StageWindows {
    dev: Window,
    review: Window,
}

fn extract_with<S, F>(source: &S, issues: &[TicketId], visit: F) -> Result<StageDurations>
where
    S: TimelineSource + ?Sized,
    F: Fn(&TimelineEvent, &mut StageWindows),
{
    let mut out = StageDurations::default();
    for &issue in issues {
        let mut events = source.timeline(issue)?;
        events.sort_by_key(|e| e.created_at);

        let mut windows = StageWindows::default();
        for event in &events {
            visit(event, &mut windows);
        }
        match windows.dev.hours() {
            Some(h) => out.dev.push(h),
            None => tracing::debug!(issue, "no complete dev stage"),
        }
        if let Some(h) = windows.review.hours() {
            out.review.push(h);
        }
    }
    tracing::debug!(
        issues = issues.len(),
        dev = out.dev.len(),
        review = out.review.len(),
        "extracted stage durations"
    );
    Ok(out)
}

fn same(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Stage boundaries from board column moves.
#[derive(Debug, Clone)]
pub struct ColumnTransitionExtractor<S> {
    source: S,
    dev_column: String,
    review_column: String,
}

impl<S: TimelineSource> ColumnTransitionExtractor<S> {
    /// Extract with columns named `dev` and `review`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            dev_column: "dev".into(),
            review_column: "review".into(),
        }
    }

    /// Use custom column names (compared case-insensitively).
    pub fn with_columns(mut self, dev: impl Into<String>, review: impl Into<String>) -> Self {
        self.dev_column = dev.into();
        self.review_column = review.into();
        self
    }
}

impl<S: TimelineSource> DurationExtractor for ColumnTransitionExtractor<S> {
    fn extract(&self, issue_numbers: &[TicketId]) -> Result<StageDurations> {
        extract_with(&self.source, issue_numbers, |event, w| {
            let TimelineEventKind::MovedColumns { from, to } = &event.kind else {
                return;
            };
            let at = Some(event.created_at);
            if let Some(to) = to {
                if same(to, &self.dev_column) {
                    w.dev.entered = at;
                }
                if same(to, &self.review_column) {
                    w.review.entered = at;
                }
            }
            if let Some(from) = from {
                if same(from, &self.dev_column) {
                    w.dev.exited = at;
                }
                if same(from, &self.review_column) {
                    w.review.exited = at;
                }
            }
        })
    }
}

/// Stage boundaries from label add/remove events.
#[derive(Debug, Clone)]
pub struct LabelEventExtractor<S> {
    source: S,
    dev_label: String,
    review_label: String,
}

impl<S: TimelineSource> LabelEventExtractor<S> {
    /// Extract with labels named `dev` and `review`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            dev_label: "dev".into(),
            review_label: "review".into(),
        }
    }

    /// Use custom label names (compared case-insensitively).
    pub fn with_labels(mut self, dev: impl Into<String>, review: impl Into<String>) -> Self {
        self.dev_label = dev.into();
        self.review_label = review.into();
        self
    }
}

impl<S: TimelineSource> DurationExtractor for LabelEventExtractor<S> {
    fn extract(&self, issue_numbers: &[TicketId]) -> Result<StageDurations> {
        extract_with(&self.source, issue_numbers, |event, w| {
            let (label, added) = match &event.kind {
                TimelineEventKind::Labeled { label } => (label, true),
                TimelineEventKind::Unlabeled { label } => (label, false),
                TimelineEventKind::MovedColumns { .. } => return,
            };
            let window = if same(label, &self.dev_label) {
                &mut w.dev
            } else if same(label, &self.review_label) {
                &mut w.review
            } else {
                return;
            };
            if added {
                window.entered = Some(event.created_at);
            } else {
                window.exited = Some(event.created_at);
            }
        })
    }
}
