//! Roster validity window.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Error returned when a `DDMmmYY` date token cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date token {token:?}: {reason}")]
pub struct DateTokenError {
    token: String,
    reason: &'static str,
}

impl DateTokenError {
    fn new(token: &str, reason: &'static str) -> Self {
        Self {
            token: token.to_string(),
            reason,
        }
    }
}

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parse a fixed-width roster date such as `01Apr24`.
///
/// Two-digit day, English three-letter month (any case), two-digit year in
/// the 2000s.
///
/// # Examples
///
/// ```
/// use roster_parser::domain::parse_date_token;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_date_token("01Apr24").unwrap(),
///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
/// );
/// assert!(parse_date_token("1Apr24").is_err());
/// assert!(parse_date_token("31Feb24").is_err());
/// ```
pub fn parse_date_token(token: &str) -> Result<NaiveDate, DateTokenError> {
    if token.len() != 7 || !token.is_ascii() {
        return Err(DateTokenError::new(token, "expected DDMmmYY"));
    }

    let day: u32 = digits(&token[0..2]).ok_or_else(|| DateTokenError::new(token, "invalid day"))?;
    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(&token[2..5]))
        .ok_or_else(|| DateTokenError::new(token, "unknown month"))?;
    let year: u32 =
        digits(&token[5..7]).ok_or_else(|| DateTokenError::new(token, "invalid year"))?;

    NaiveDate::from_ymd_opt(2000 + year as i32, month as u32 + 1, day)
        .ok_or_else(|| DateTokenError::new(token, "no such calendar date"))
}

fn digits(s: &str) -> Option<u32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// The published validity range of one roster document.
///
/// Both bounds are inclusive calendar dates. A `Period` always has
/// `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    #[serde(rename = "startDate")]
    start: NaiveDate,
    #[serde(rename = "endDate")]
    end: NaiveDate,
}

impl Period {
    /// Create a period, returning `None` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies in `[start, end + 1 day]`.
    ///
    /// The extra day admits duties printed on the last row that report
    /// after midnight.
    pub fn contains_with_grace(&self, date: NaiveDate) -> bool {
        let last = self
            .end
            .checked_add_signed(Duration::days(1))
            .unwrap_or(self.end);
        self.start <= date && date <= last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_tokens() {
        assert_eq!(parse_date_token("01Apr24").unwrap(), date(2024, 4, 1));
        assert_eq!(parse_date_token("15APR24").unwrap(), date(2024, 4, 15));
        assert_eq!(parse_date_token("31dec99").unwrap(), date(2099, 12, 31));
        assert_eq!(parse_date_token("29Feb24").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn reject_malformed_tokens() {
        assert!(parse_date_token("").is_err());
        assert!(parse_date_token("1Apr24").is_err());
        assert!(parse_date_token("01Apr2024").is_err());
        assert!(parse_date_token("01Xyz24").is_err());
        assert!(parse_date_token("AAApr24").is_err());
        assert!(parse_date_token("01AprXX").is_err());
        assert!(parse_date_token("29Feb23").is_err());
        assert!(parse_date_token("00Apr24").is_err());
    }

    #[test]
    fn error_names_token_and_reason() {
        let err = parse_date_token("01Xyz24").unwrap_err();
        assert_eq!(err.to_string(), "invalid date token \"01Xyz24\": unknown month");
    }

    #[test]
    fn period_rejects_inverted_window() {
        assert!(Period::new(date(2024, 4, 15), date(2024, 4, 1)).is_none());
        assert!(Period::new(date(2024, 4, 1), date(2024, 4, 1)).is_some());
    }

    #[test]
    fn grace_day_after_end() {
        let period = Period::new(date(2024, 4, 1), date(2024, 4, 15)).unwrap();

        assert!(period.contains_with_grace(date(2024, 4, 1)));
        assert!(period.contains_with_grace(date(2024, 4, 15)));
        assert!(period.contains_with_grace(date(2024, 4, 16)));
        assert!(!period.contains_with_grace(date(2024, 4, 17)));
        assert!(!period.contains_with_grace(date(2024, 3, 31)));
    }

    #[test]
    fn serializes_with_document_field_names() {
        let period = Period::new(date(2024, 4, 1), date(2024, 4, 15)).unwrap();
        let json = serde_json::to_value(period).unwrap();
        assert_eq!(json["startDate"], "2024-04-01");
        assert_eq!(json["endDate"], "2024-04-15");
    }
}
