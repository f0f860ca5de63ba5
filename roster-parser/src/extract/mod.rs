//! Roster extraction pipeline.
//!
//! Stages run strictly in order, each fully finishing before the next:
//!
//! 1. normalise: flatten all whitespace
//! 2. identity: find the period and the operator identifier
//! 3. segment: cut the table out and match the three fragment families
//! 4. build: resolve dates, construct records, sort
//!
//! Fatal problems surface as [`ParseFailure`]; everything else is recorded
//! in the [`DiagnosticsLog`] and the run continues.

mod build;
mod config;
mod error;
mod normalize;
mod period;
mod resolve;
mod segment;


pub use build::RecordBuilder;
pub use config::ParserConfig;
pub use error::{DateError, FragmentError, ParseError, ParseFailure};
pub use normalize::normalize;
pub use period::{Identity, extract_identity, extract_operator_id, extract_period};
pub use resolve::{DateResolver, ResolvedDate};
pub use segment::{
    FlightBlock, HEADER_PREAMBLE, LegToken, OffToken, Segments, StandbyToken, extract_body, scan,
};

use tracing::{debug, info};

use crate::diagnostics::DiagnosticsLog;
use crate::domain::{Duty, OperatorId, Period};

/// The outcome of a successful document parse.
#[derive(Debug, Clone)]
pub struct ParsedRoster {
    pub period: Period,
    pub operator_id: OperatorId,
    /// Duties ordered by date.
    pub duties: Vec<Duty>,
    pub log: DiagnosticsLog,
}

/// Parse one document's extracted text.
///
/// # Errors
///
/// Returns [`ParseFailure`] for empty input, a missing or malformed period,
/// a missing operator identifier, an empty roster body, or too many
/// matched fragments. The failure carries the log recorded so far, ending
/// with a warning that names the fatal error.
///
/// # Examples
///
/// ```
/// use roster_parser::extract::{ParserConfig, parse_roster};
///
/// let text = "Period: 01Apr24 - 15Apr24 Crew J Doe (123456)\n\
///             Mon01 O_M\n\
///             Total Block Hours 00:00";
/// let roster = parse_roster(Some(text), &ParserConfig::default()).unwrap();
/// assert_eq!(roster.duties.len(), 1);
/// ```
pub fn parse_roster(raw: Option<&str>, config: &ParserConfig) -> Result<ParsedRoster, ParseFailure> {
    let mut log = DiagnosticsLog::new();

    match run(raw, config, &mut log) {
        Ok((identity, duties)) => {
            info!(
                operator = %identity.operator_id,
                duties = duties.len(),
                log_entries = log.len(),
                "parsed roster"
            );
            Ok(ParsedRoster {
                period: identity.period,
                operator_id: identity.operator_id,
                duties,
                log,
            })
        }
        Err(error) => {
            log.warning_with("roster could not be parsed", None, &error);
            Err(ParseFailure { error, log })
        }
    }
}

fn run(
    raw: Option<&str>,
    config: &ParserConfig,
    log: &mut DiagnosticsLog,
) -> Result<(Identity, Vec<Duty>), ParseError> {
    let text = normalize(raw)?;
    debug!(chars = text.len(), "normalised input");

    let identity = extract_identity(&text, log)?;
    let body = extract_body(&text, log)?;
    let segments = scan(&body, config, log)?;

    let resolver = DateResolver::new(identity.period, config.date_search_months);
    let mut builder = RecordBuilder::new(resolver, identity.operator_id);
    builder.add_segments(&segments, log);

    Ok((identity, builder.finish(log)))
}
