//! Domain types for crew roster extraction.
//!
//! This module contains the validated value types that parsed roster
//! fragments are turned into. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod clock;
mod duty;
mod error;
mod operator;
mod period;
mod station;

pub use clock::{ClockError, ClockTime, TimeSpan, parse_clock_pair};
pub use duty::{Duty, DutyType, NewDuty};
pub use error::DomainError;
pub use operator::{InvalidOperatorId, OperatorId};
pub use period::{DateTokenError, Period, parse_date_token};
pub use station::{InvalidStation, Station};
