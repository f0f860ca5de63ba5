//! Period and operator identifier discovery.
//!
//! Both are fatal if missing: every weekday+day token in the roster is
//! resolved relative to the period, and every record key carries the
//! identifier.

use std::sync::LazyLock;

use regex::Regex;

use super::ParseError;
use crate::diagnostics::DiagnosticsLog;
use crate::domain::{OperatorId, Period, parse_date_token};

static PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Period:(?P<body>.*?)Crew").expect("valid period regex"));

static OPERATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?P<id>\d{6})\)").expect("valid operator regex"));

/// The anchor facts of one roster document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub period: Period,
    pub operator_id: OperatorId,
}

/// Find the `Period:<start>-<end>Crew` declaration and read both dates.
pub fn extract_period(text: &str) -> Result<Period, ParseError> {
    let caps = PERIOD_RE.captures(text).ok_or(ParseError::MissingPeriod)?;
    let body = &caps["body"];

    let (start, end) = body.split_once('-').ok_or_else(|| {
        ParseError::InvalidDateToken(format!("expected <start>-<end>, found {body:?}"))
    })?;

    let start = parse_date_token(start)?;
    let end = parse_date_token(end)?;

    Period::new(start, end).ok_or(ParseError::InvertedPeriod { start, end })
}

/// Find the first parenthesised 6-digit identifier.
pub fn extract_operator_id(text: &str) -> Result<OperatorId, ParseError> {
    let caps = OPERATOR_RE
        .captures(text)
        .ok_or(ParseError::MissingOperatorId)?;
    OperatorId::parse(&caps["id"]).map_err(|_| ParseError::MissingOperatorId)
}

/// Extract period and identifier, logging the resolved window.
pub fn extract_identity(text: &str, log: &mut DiagnosticsLog) -> Result<Identity, ParseError> {
    let period = extract_period(text)?;
    let operator_id = extract_operator_id(text)?;

    log.edge_case(
        format!(
            "roster period {} to {} for operator {}",
            period.start(),
            period.end(),
            operator_id
        ),
        None,
    );

    Ok(Identity {
        period,
        operator_id,
    })
}
