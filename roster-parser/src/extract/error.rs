//! Extraction error types.
//!
//! `ParseError` is the fail-fast channel: any of its variants aborts the
//! whole document. `DateError` and `FragmentError` are per-fragment and end
//! up as log entries instead.

use crate::diagnostics::DiagnosticsLog;
use crate::domain::{ClockError, DateTokenError, DomainError, InvalidStation};

/// Fatal errors that abort a document parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Input text was absent or contained only whitespace
    #[error("input text is empty")]
    EmptyInput,

    /// No `Period:` declaration was found
    #[error("no roster period declaration found")]
    MissingPeriod,

    /// No parenthesised 6-digit operator identifier was found
    #[error("no operator identifier found")]
    MissingOperatorId,

    /// A period date token could not be read
    #[error("malformed period: {0}")]
    InvalidDateToken(String),

    /// The period ends before it starts
    #[error("period start {start} is after period end {end}")]
    InvertedPeriod {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// Nothing left to scan after truncation or header removal
    #[error("roster body is empty {0}")]
    EmptySegment(&'static str),

    /// More fragments matched than the configured bound allows
    #[error("matched {found} fragments, more than the limit of {limit}")]
    TooManyFragments { found: usize, limit: usize },
}

impl From<DateTokenError> for ParseError {
    fn from(err: DateTokenError) -> Self {
        ParseError::InvalidDateToken(err.to_string())
    }
}

/// A fatal error together with everything logged up to the failure.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{error}")]
pub struct ParseFailure {
    #[source]
    pub error: ParseError,
    pub log: DiagnosticsLog,
}

/// Failure to turn a weekday+day token into a date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Unknown weekday, impossible day of month, or no such day in the
    /// searched months
    #[error("invalid date token {token:?}: {reason}")]
    InvalidDateToken { token: String, reason: &'static str },

    /// The resolved date lies outside the roster period
    #[error("date {date} for {token:?} is outside the roster period {start}..={end} (+1 day)")]
    DateOutOfRange {
        token: String,
        date: chrono::NaiveDate,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

/// Failure to build a record from a matched fragment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FragmentError {
    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Station(#[from] InvalidStation),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
