//! Error taxonomy shared by every forecasting operation.

use thiserror::Error;

/// Errors raised while building models or running a forecast.
///
/// The three variants are kept distinguishable so that a front end can pick
/// an exit code per kind (see [`Error::kind`]).
#[derive(Debug, Error)]
pub enum Error {
    /// An input violates a structural requirement: an unordered PERT triad,
    /// a path or draw count below one, or a malformed distribution config.
    #[error("invalid {field}: {message}")]
    Validation {
        /// The offending field or parameter.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A required input collection is empty, so there is nothing to sample from.
    #[error("no data: {0}")]
    Data(String),

    /// A collaborator supplying inputs (tracker client, file loader) failed
    /// before the core was invoked.
    #[error("upstream source failed: {0}")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Validation`].
    Validation,
    /// See [`Error::Data`].
    Data,
    /// See [`Error::Upstream`].
    Upstream,
}

impl Error {
    /// Build a validation error for `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Build a data error.
    pub fn data(message: impl Into<String>) -> Self {
        Self::Data(message.into())
    }

    /// Wrap a collaborator failure.
    pub fn upstream(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Upstream(source.into())
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Data(_) => ErrorKind::Data,
            Self::Upstream(_) => ErrorKind::Upstream,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Reject a Monte Carlo count below one.
pub(crate) fn ensure_count(field: &'static str, count: usize) -> Result<()> {
    if count < 1 {
        return Err(Error::validation(field, format!("must be >= 1, got {count}")));
    }
    Ok(())
}

/// Reject a non-finite or non-positive quantity.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(Error::validation(
            field,
            format!("must be a positive finite number, got {value}"),
        ));
    }
    Ok(())
}
