//! Crew roster extraction.
//!
//! Turns the flattened text of an airline crew duty roster into a dated,
//! ordered list of duties (days off, standbys, flight and deadhead legs)
//! together with a log of everything that could not be read cleanly.

pub mod diagnostics;
pub mod domain;
pub mod extract;
pub mod output;
