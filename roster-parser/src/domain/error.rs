//! Domain error types.
//!
//! These errors represent construction failures of validated domain values.
//! They are distinct from document-level parse errors.

/// Domain-level errors for record construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A duty's fields violate one of its invariants
    #[error("invalid duty: {0}")]
    InvalidDuty(&'static str),

    /// Adding a day to a date left the representable calendar
    #[error("date overflow after {0}")]
    DateOverflow(chrono::NaiveDate),
}
