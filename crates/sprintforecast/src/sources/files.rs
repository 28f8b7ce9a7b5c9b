//! File-backed sources.
//!
//! | Input | Format |
//! |-------|--------|
//! | Triads | CSV `number,title,optimistic,mode,pessimistic[,deps]`; `deps` is a `;`-separated list of issue numbers; optional header row |
//! | Capacity history | one total per line, oldest first |
//! | Timelines | JSON object mapping issue number to a list of [`TimelineEvent`]s |
//! | Distribution | JSON `{"type": ..., "params": {...}}` |
//!
//! Blank lines and lines starting with `#` are skipped in the text formats.
//! Read and parse failures are reported as
//! [`Error::Upstream`](sprintforecast_core::Error::Upstream); a well-formed
//! file with an unordered triad is a validation error.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use sprintforecast_core::distribution::Distribution;
use sprintforecast_core::{Error, Result, Ticket, TicketId, TriadRecord};

use super::{CapacityHistorySource, TimelineEvent, TimelineSource, TriadSource};
use crate::config::parse_distribution_config;

/// Failure reading an input file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file could not be read.
    #[error("{path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed.
    #[error("{path}:{line}: {message}")]
    Parse {
        /// File path.
        path: String,
        /// 1-indexed line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// A JSON document could not be parsed.
    #[error("{path}: {source}")]
    Json {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::upstream(SourceError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> Error {
    Error::upstream(SourceError::Parse {
        path: path.display().to_string(),
        line,
        message: message.into(),
    })
}

/// Non-blank, non-comment lines with their 1-indexed numbers.
fn content_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut out = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| io_error(path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        out.push((i + 1, trimmed.to_string()));
    }
    Ok(out)
}

fn parse_number<T: std::str::FromStr>(path: &Path, line: usize, what: &str, s: &str) -> Result<T> {
    s.trim()
        .parse()
        .map_err(|_| parse_error(path, line, format!("invalid {what} '{}'", s.trim())))
}

/// Read ticket triads from a CSV file.
///
/// # Errors
///
/// - [`Error::Upstream`] if the file cannot be read or a row is malformed.
/// - [`Error::Validation`] if a triad is not strictly ordered.
pub fn load_triads(path: &Path) -> Result<Vec<TriadRecord>> {
    let mut records = Vec::new();
    for (n, (line_no, line)) in content_lines(path)?.into_iter().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        if n == 0 && fields[0].trim().eq_ignore_ascii_case("number") {
            continue;
        }
        if !(5..=6).contains(&fields.len()) {
            return Err(parse_error(
                path,
                line_no,
                format!("expected 5 or 6 columns, got {}", fields.len()),
            ));
        }

        let number: TicketId = parse_number(path, line_no, "ticket number", fields[0])?;
        let o: f64 = parse_number(path, line_no, "optimistic estimate", fields[2])?;
        let m: f64 = parse_number(path, line_no, "mode estimate", fields[3])?;
        let p: f64 = parse_number(path, line_no, "pessimistic estimate", fields[4])?;
        let deps = match fields.get(5) {
            Some(list) => list
                .split(';')
                .filter(|s| !s.trim().is_empty())
                .map(|s| parse_number::<TicketId>(path, line_no, "dependency", s))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let ticket = Ticket::new(number, o, m, p)?.with_dependencies(deps);
        records.push(TriadRecord::new(fields[1].trim(), ticket));
    }
    tracing::debug!(path = %path.display(), tickets = records.len(), "loaded triads");
    Ok(records)
}

/// Read per-sprint capacity totals, one per line.
///
/// # Errors
///
/// Returns [`Error::Upstream`] if the file cannot be read or a line is not a number.
pub fn load_capacity_history(path: &Path) -> Result<Vec<f64>> {
    content_lines(path)?
        .into_iter()
        .map(|(line_no, line)| parse_number(path, line_no, "capacity", &line))
        .collect()
}

/// Read a JSON map from issue number to timeline events.
///
/// # Errors
///
/// Returns [`Error::Upstream`] if the file cannot be read or parsed.
pub fn load_timelines(path: &Path) -> Result<HashMap<TicketId, Vec<TimelineEvent>>> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&text).map_err(|source| {
        Error::upstream(SourceError::Json {
            path: path.display().to_string(),
            source,
        })
    })
}

/// Read a distribution config.
///
/// # Errors
///
/// - [`Error::Upstream`] if the file cannot be read.
/// - [`Error::Validation`] if the config is malformed.
pub fn load_distribution(path: &Path) -> Result<Distribution> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_distribution_config(&text)
}

/// [`TriadSource`] reading a CSV file on every fetch.
#[derive(Debug, Clone)]
pub struct TriadFile {
    path: PathBuf,
}

impl TriadFile {
    /// Source backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TriadSource for TriadFile {
    fn fetch_triads(&self) -> Result<Vec<TriadRecord>> {
        load_triads(&self.path)
    }
}

/// [`CapacityHistorySource`] reading a text file.
#[derive(Debug, Clone)]
pub struct CapacityFile {
    path: PathBuf,
}

impl CapacityFile {
    /// Source backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CapacityHistorySource for CapacityFile {
    fn historical_capacity(&self) -> Result<Vec<f64>> {
        load_capacity_history(&self.path)
    }
}

/// [`TimelineSource`] over timelines loaded once from JSON.
#[derive(Debug, Clone, Default)]
pub struct TimelineFile {
    timelines: HashMap<TicketId, Vec<TimelineEvent>>,
}

impl TimelineFile {
    /// Load every timeline from `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            timelines: load_timelines(path)?,
        })
    }

    /// Wrap timelines already in memory.
    pub fn from_map(timelines: HashMap<TicketId, Vec<TimelineEvent>>) -> Self {
        Self { timelines }
    }
}

impl TimelineSource for TimelineFile {
    fn timeline(&self, issue: TicketId) -> Result<Vec<TimelineEvent>> {
        Ok(self.timelines.get(&issue).cloned().unwrap_or_default())
    }
}
