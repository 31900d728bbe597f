//! # Calculator Errors
//!
//! Every failure of the calculator is returned as a [`TideError`] value. Queries
//! never panic: a time outside the half-cycle or a height outside the tidal range
//! is a recoverable error that the interactive loop reports before reading the
//! next query. Only a degenerate reference (nothing to interpolate between)
//! ends a session.

use crate::ClockTime;
use thiserror::Error;

/// Errors produced while building a reference, answering a query, or reading input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TideError {
    /// Both extrema have the same height, so no height can be inverted
    #[error("degenerate reference: both extrema are at {height_m:.2} m")]
    DegenerateRange { height_m: f64 },

    /// Both extrema are at the same time, so the half-cycle has no duration
    #[error("degenerate reference: both extrema are at {time}")]
    DegenerateDuration { time: ClockTime },

    /// The queried time (after the seasonal offset) lies outside the half-cycle
    #[error("time {time} is outside the half-cycle {start} - {end}")]
    QueryOutOfRange {
        time: ClockTime,
        start: ClockTime,
        end: ClockTime,
    },

    /// The queried height lies outside the range spanned by the two extrema
    #[error("height {height_m:.2} m is outside the tidal range {low_m:.2} - {high_m:.2} m")]
    HeightOutOfRange { height_m: f64, low_m: f64, high_m: f64 },

    /// A token could not be read as a time, a height or a command
    #[error("malformed input '{input}': {reason}")]
    MalformedInput { input: String, reason: String },
}

/// Coarse classification of [`TideError`] used by callers that only need to
/// branch on the failure category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Construction,
    QueryOutOfRange,
    HeightOutOfRange,
    MalformedInput,
}

impl TideError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TideError::DegenerateRange { .. } | TideError::DegenerateDuration { .. } => {
                ErrorKind::Construction
            }
            TideError::QueryOutOfRange { .. } => ErrorKind::QueryOutOfRange,
            TideError::HeightOutOfRange { .. } => ErrorKind::HeightOutOfRange,
            TideError::MalformedInput { .. } => ErrorKind::MalformedInput,
        }
    }

    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        TideError::MalformedInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
