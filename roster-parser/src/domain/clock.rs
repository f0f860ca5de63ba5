//! Roster clock values.
//!
//! Rosters print times as bare four-digit "HHMM" groups with no date. This
//! module validates those groups and anchors them to a calendar date,
//! handling duties that finish after midnight.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use std::fmt;

/// Error returned when parsing an invalid clock value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid clock value {input:?}: {reason}")]
pub struct ClockError {
    input: String,
    reason: &'static str,
}

impl ClockError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A validated time of day in "HHMM" form, not yet tied to a date.
///
/// # Examples
///
/// ```
/// use roster_parser::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("0830").unwrap();
/// assert_eq!(t.to_string(), "08:30");
///
/// assert!(ClockTime::parse_hhmm("2400").is_err());
/// assert!(ClockTime::parse_hhmm("08:30").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse a clock value from exactly four ASCII digits.
    pub fn parse_hhmm(s: &str) -> Result<Self, ClockError> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 {
            return Err(ClockError::new(s, "expected HHMM format"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| ClockError::new(s, "invalid hour digits"))?;
        if hour > 23 {
            return Err(ClockError::new(s, "hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[2..4])
            .ok_or_else(|| ClockError::new(s, "invalid minute digits"))?;
        if minute > 59 {
            return Err(ClockError::new(s, "minute must be 0-59"));
        }

        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(ClockTime)
            .ok_or_else(|| ClockError::new(s, "invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Anchors this clock value to a calendar date as a UTC instant.
    pub fn on(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_time(self.0).and_utc()
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A start/end pair anchored to absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// True when the end was moved to the following day.
    pub overnight: bool,
}

impl TimeSpan {
    /// Anchors a start and end clock value to `date`.
    ///
    /// The start always stays on `date`. If the end clock value is
    /// numerically earlier than the start, the end falls on the next day.
    /// Equal values are a zero-length span on the same day.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_parser::domain::{ClockTime, TimeSpan};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 4, 3).unwrap();
    /// let dep = ClockTime::parse_hhmm("2300").unwrap();
    /// let arr = ClockTime::parse_hhmm("0100").unwrap();
    ///
    /// let span = TimeSpan::anchored(date, dep, arr).unwrap();
    /// assert!(span.overnight);
    /// assert_eq!(span.end.date_naive(), NaiveDate::from_ymd_opt(2024, 4, 4).unwrap());
    /// ```
    pub fn anchored(date: NaiveDate, start: ClockTime, end: ClockTime) -> Option<Self> {
        let overnight = end < start;
        let end_date = if overnight {
            date.checked_add_signed(Duration::days(1))?
        } else {
            date
        };

        Some(Self {
            start: start.on(date),
            end: end.on(end_date),
            overnight,
        })
    }

    /// The whole UTC day `[00:00:00.000, 23:59:59.999]` of `date`.
    pub fn full_day(date: NaiveDate) -> Self {
        Self {
            start: date.and_time(NaiveTime::MIN).and_utc(),
            end: date.and_time(end_of_day()).and_utc(),
            overnight: false,
        }
    }
}

/// Split an eight-digit field into its two four-digit clock values.
pub fn parse_clock_pair(s: &str) -> Result<(ClockTime, ClockTime), ClockError> {
    if s.len() != 8 || !s.is_ascii() {
        return Err(ClockError::new(s, "expected two concatenated HHMM values"));
    }
    let (first, second) = s.split_at(4);
    Ok((ClockTime::parse_hhmm(first)?, ClockTime::parse_hhmm(second)?))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let t = clock("0000");
        assert_eq!((t.hour(), t.minute()), (0, 0));

        let t = clock("2359");
        assert_eq!((t.hour(), t.minute()), (23, 59));

        let t = clock("1430");
        assert_eq!((t.hour(), t.minute()), (14, 30));
    }

    #[test]
    fn parse_invalid_format() {
        assert!(ClockTime::parse_hhmm("143").is_err());
        assert!(ClockTime::parse_hhmm("14300").is_err());
        assert!(ClockTime::parse_hhmm("14:3").is_err());
        assert!(ClockTime::parse_hhmm("1a30").is_err());
        assert!(ClockTime::parse_hhmm("").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(ClockTime::parse_hhmm("2400").is_err());
        assert!(ClockTime::parse_hhmm("2500").is_err());
        assert!(ClockTime::parse_hhmm("1260").is_err());
        assert!(ClockTime::parse_hhmm("1299").is_err());
    }

    #[test]
    fn error_message_includes_input() {
        let err = ClockTime::parse_hhmm("2500").unwrap_err();
        assert_eq!(err.to_string(), "invalid clock value \"2500\": hour must be 0-23");
    }

    #[test]
    fn display_format() {
        assert_eq!(clock("0905").to_string(), "09:05");
        assert_eq!(format!("{:?}", clock("0905")), "ClockTime(0905)");
    }

    #[test]
    fn ordering() {
        assert!(clock("0600") < clock("0700"));
        assert!(clock("2300") > clock("0100"));
    }

    #[test]
    fn anchored_same_day() {
        let d = date(2024, 4, 3);
        let span = TimeSpan::anchored(d, clock("0600"), clock("0700")).unwrap();

        assert!(!span.overnight);
        assert_eq!(span.start.to_rfc3339(), "2024-04-03T06:00:00+00:00");
        assert_eq!(span.end.to_rfc3339(), "2024-04-03T07:00:00+00:00");
    }

    #[test]
    fn anchored_rolls_end_past_midnight() {
        let d = date(2024, 4, 3);
        let span = TimeSpan::anchored(d, clock("2300"), clock("0100")).unwrap();

        assert!(span.overnight);
        assert_eq!(span.start.date_naive(), d);
        assert_eq!(span.end.date_naive(), date(2024, 4, 4));
        assert!(span.start < span.end);
    }

    #[test]
    fn anchored_equal_clocks_stay_on_date() {
        let d = date(2024, 4, 3);
        let span = TimeSpan::anchored(d, clock("1200"), clock("1200")).unwrap();

        assert!(!span.overnight);
        assert_eq!(span.start, span.end);
    }

    #[test]
    fn anchored_rolls_over_month_end() {
        let span = TimeSpan::anchored(date(2024, 4, 30), clock("2330"), clock("0015")).unwrap();
        assert_eq!(span.end.date_naive(), date(2024, 5, 1));
    }

    #[test]
    fn full_day_bounds() {
        let span = TimeSpan::full_day(date(2024, 4, 1));
        assert_eq!(span.start.to_rfc3339(), "2024-04-01T00:00:00+00:00");
        assert_eq!(
            span.end.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "2024-04-01T23:59:59.999Z"
        );
    }

    #[test]
    fn clock_pair_splits_halves() {
        let (dep, arr) = parse_clock_pair("06000700").unwrap();
        assert_eq!(dep, clock("0600"));
        assert_eq!(arr, clock("0700"));
    }

    #[test]
    fn clock_pair_rejects_bad_halves() {
        assert!(parse_clock_pair("0600070").is_err());
        assert!(parse_clock_pair("25000700").is_err());
        assert!(parse_clock_pair("06000760").is_err());
    }
}
