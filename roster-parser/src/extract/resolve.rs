//! Weekday + day-of-month disambiguation.
//!
//! Roster rows carry only a weekday abbreviation and a day of month
//! ("Tue02"). The full date is recovered by trying that day in the months
//! starting at the period's first month and keeping the first whose weekday
//! agrees.

use chrono::{Datelike, Months, NaiveDate, Weekday};

use super::DateError;
use crate::domain::Period;

/// A resolved calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    /// False when no searched month had the right weekday and the last
    /// candidate was returned anyway.
    pub weekday_matched: bool,
}

/// Resolves weekday+day tokens against one roster period.
#[derive(Debug, Clone, Copy)]
pub struct DateResolver {
    period: Period,
    search_months: u32,
}

impl DateResolver {
    /// At least the period's start month is always searched; a zero window
    /// is raised to one.
    pub fn new(period: Period, search_months: u32) -> Self {
        Self {
            period,
            search_months: search_months.max(1),
        }
    }

    /// Resolve `weekday` (e.g. "Tue") and `day` (e.g. "02") to a date.
    ///
    /// Candidates are tried in up to `search_months` consecutive months
    /// starting at the period's start month; days that do not exist in a
    /// month are skipped. When no candidate has the right weekday, the last
    /// existing candidate is returned with `weekday_matched == false`.
    ///
    /// # Errors
    ///
    /// - [`DateError::InvalidDateToken`] for an unknown weekday, a day
    ///   outside 1-31, or a day that exists in none of the searched months.
    /// - [`DateError::DateOutOfRange`] when the chosen date is outside
    ///   `[period start, period end + 1 day]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_parser::domain::Period;
    /// use roster_parser::extract::DateResolver;
    /// use chrono::NaiveDate;
    ///
    /// let period = Period::new(
    ///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
    /// )
    /// .unwrap();
    /// let resolver = DateResolver::new(period, 2);
    ///
    /// let resolved = resolver.resolve("Tue", "02").unwrap();
    /// assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
    /// assert!(resolved.weekday_matched);
    /// ```
    pub fn resolve(&self, weekday: &str, day: &str) -> Result<ResolvedDate, DateError> {
        let token = format!("{weekday}{day}");
        let invalid = |reason| DateError::InvalidDateToken {
            token: token.clone(),
            reason,
        };

        let weekday = parse_weekday(weekday).ok_or_else(|| invalid("unknown weekday"))?;
        let day = parse_day(day).ok_or_else(|| invalid("day of month must be 1-31"))?;

        let first_month = self
            .period
            .start()
            .with_day(1)
            .ok_or_else(|| invalid("period start has no first day"))?;

        let mut last_candidate = None;
        let mut matched = None;
        for offset in 0..self.search_months {
            let Some(month) = first_month.checked_add_months(Months::new(offset)) else {
                break;
            };
            let Some(candidate) = month.with_day(day) else {
                continue;
            };
            if candidate.weekday() == weekday {
                matched = Some(candidate);
                break;
            }
            last_candidate = Some(candidate);
        }

        let resolved = match (matched, last_candidate) {
            (Some(date), _) => ResolvedDate {
                date,
                weekday_matched: true,
            },
            (None, Some(date)) => ResolvedDate {
                date,
                weekday_matched: false,
            },
            (None, None) => return Err(invalid("day does not exist in the searched months")),
        };

        if !self.period.contains_with_grace(resolved.date) {
            return Err(DateError::DateOutOfRange {
                token,
                date: resolved.date,
                start: self.period.start(),
                end: self.period.end(),
            });
        }

        Ok(resolved)
    }
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    let weekday = match s.to_ascii_lowercase().as_str() {
        "mon" => Weekday::Mon,
        "tue" => Weekday::Tue,
        "wed" => Weekday::Wed,
        "thu" => Weekday::Thu,
        "fri" => Weekday::Fri,
        "sat" => Weekday::Sat,
        "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

fn parse_day(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|d| (1..=31).contains(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolver(start: NaiveDate, end: NaiveDate) -> DateResolver {
        DateResolver::new(Period::new(start, end).unwrap(), 2)
    }

    fn april() -> DateResolver {
        resolver(date(2024, 4, 1), date(2024, 4, 15))
    }

    #[test]
    fn resolves_in_start_month() {
        let r = april();
        assert_eq!(r.resolve("Mon", "01").unwrap().date, date(2024, 4, 1));
        assert_eq!(r.resolve("Tue", "02").unwrap().date, date(2024, 4, 2));
        assert_eq!(r.resolve("Wed", "3").unwrap().date, date(2024, 4, 3));
    }

    #[test]
    fn weekday_is_case_insensitive() {
        assert_eq!(april().resolve("MON", "01").unwrap().date, date(2024, 4, 1));
    }

    #[test]
    fn resolves_in_following_month() {
        // 1 April 2024 is a Monday, 1 May 2024 a Wednesday
        let r = resolver(date(2024, 4, 20), date(2024, 5, 10));
        let resolved = r.resolve("Wed", "01").unwrap();
        assert_eq!(resolved.date, date(2024, 5, 1));
        assert!(resolved.weekday_matched);
    }

    #[test]
    fn resolves_across_year_end() {
        // 1 December 2024 is a Sunday, 1 January 2025 a Wednesday
        let r = resolver(date(2024, 12, 20), date(2025, 1, 5));
        assert_eq!(r.resolve("Wed", "01").unwrap().date, date(2025, 1, 1));
    }

    #[test]
    fn skips_days_missing_from_a_month() {
        // No 31 April; 31 May 2024 is a Friday
        let r = resolver(date(2024, 4, 1), date(2024, 5, 31));
        assert_eq!(r.resolve("Fri", "31").unwrap().date, date(2024, 5, 31));
    }

    /// Best-effort fallback: when no searched month has the right weekday
    /// the last candidate is still returned, flagged as unmatched.
    #[test]
    fn falls_back_to_last_candidate_when_weekday_never_matches() {
        // 3 April 2024 is a Wednesday, 3 May 2024 a Friday
        let r = resolver(date(2024, 4, 1), date(2024, 5, 31));
        let resolved = r.resolve("Sun", "03").unwrap();

        assert_eq!(resolved.date, date(2024, 5, 3));
        assert!(!resolved.weekday_matched);
        assert_ne!(resolved.date.weekday(), Weekday::Sun);
    }

    #[test]
    fn fallback_candidate_is_still_range_checked() {
        let err = april().resolve("Sun", "03").unwrap_err();
        assert!(matches!(err, DateError::DateOutOfRange { date: d, .. } if d == date(2024, 5, 3)));
    }

    #[test]
    fn accepts_one_day_after_period_end() {
        // 16 April 2024 is a Tuesday
        assert_eq!(april().resolve("Tue", "16").unwrap().date, date(2024, 4, 16));
    }

    #[test]
    fn rejects_dates_outside_period() {
        // 29 April 2024 is a Monday
        let err = april().resolve("Mon", "29").unwrap_err();
        assert_eq!(
            err,
            DateError::DateOutOfRange {
                token: "Mon29".into(),
                date: date(2024, 4, 29),
                start: date(2024, 4, 1),
                end: date(2024, 4, 15),
            }
        );
    }

    #[test]
    fn rejects_unknown_weekday() {
        let err = april().resolve("Xyz", "01").unwrap_err();
        assert_eq!(
            err,
            DateError::InvalidDateToken {
                token: "Xyz01".into(),
                reason: "unknown weekday",
            }
        );
        assert!(april().resolve("Monday", "01").is_err());
    }

    #[test]
    fn rejects_day_out_of_range() {
        for day in ["0", "00", "32", "99", "", "123", "1a"] {
            assert!(
                matches!(
                    april().resolve("Mon", day),
                    Err(DateError::InvalidDateToken { .. })
                ),
                "day {day:?} should be rejected"
            );
        }
    }

    #[test]
    fn zero_window_still_searches_start_month() {
        let r = DateResolver::new(Period::new(date(2024, 4, 1), date(2024, 4, 15)).unwrap(), 0);
        let resolved = r.resolve("Mon", "01").unwrap();
        assert_eq!(resolved.date, date(2024, 4, 1));
        assert!(resolved.weekday_matched);
    }

    #[test]
    fn day_missing_from_every_searched_month() {
        let r = DateResolver::new(Period::new(date(2024, 2, 1), date(2024, 2, 29)).unwrap(), 1);
        let err = r.resolve("Fri", "30").unwrap_err();
        assert_eq!(
            err,
            DateError::InvalidDateToken {
                token: "Fri30".into(),
                reason: "day does not exist in the searched months",
            }
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn weekday_abbrev(date: NaiveDate) -> String {
        date.weekday().to_string()
    }

    fn period_and_offset() -> impl Strategy<Value = (NaiveDate, i64, i64)> {
        (2000i32..2099, 1u32..=12, 1u32..=28, 0i64..45)
            .prop_flat_map(|(y, m, d, len)| {
                let start = NaiveDate::from_ymd_opt(y, m, d).unwrap();
                (Just(start), Just(len), 0..=len)
            })
    }

    proptest! {
        /// Every successful resolution lies inside the grace window
        #[test]
        fn resolved_dates_are_in_window(
            (start, len, _) in period_and_offset(),
            weekday in prop::sample::select(vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]),
            day in 1u32..=31
        ) {
            let period = Period::new(start, start + Duration::days(len)).unwrap();
            let resolver = DateResolver::new(period, 2);

            if let Ok(resolved) = resolver.resolve(weekday, &day.to_string()) {
                prop_assert!(period.contains_with_grace(resolved.date));
                prop_assert_eq!(resolved.date.day(), day);
                if resolved.weekday_matched {
                    prop_assert_eq!(weekday_abbrev(resolved.date), weekday);
                }
            }
        }

        /// A date in the period's first month resolves back to itself
        #[test]
        fn start_month_dates_roundtrip((start, len, offset) in period_and_offset()) {
            let period = Period::new(start, start + Duration::days(len)).unwrap();
            let target = start + Duration::days(offset);
            prop_assume!(target.month() == start.month());

            let resolver = DateResolver::new(period, 2);
            let resolved = resolver
                .resolve(&weekday_abbrev(target), &format!("{:02}", target.day()))
                .unwrap();
            prop_assert_eq!(resolved.date, target);
            prop_assert!(resolved.weekday_matched);
        }
    }
}
