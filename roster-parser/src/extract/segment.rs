//! Roster body segmentation.
//!
//! The roster table is cut out of the flattened text and scanned by three
//! independent pattern families: off days, standbys and flight-duty blocks.
//! Each family yields fully materialised tokens that borrow from the body.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::{ParseError, ParserConfig};
use crate::diagnostics::DiagnosticsLog;

/// Marks the start of the summary/footer section; everything from the first
/// occurrence onwards is dropped.
static END_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Total(?:Block|Duty|Credit)Hours").expect("valid end marker regex")
});

/// The table column headings, as they appear once whitespace is removed.
pub const HEADER_PREAMBLE: &str = "DateDutyReportFlightFromDepArrToDutyPeriod";

const WEEKDAY_DAY: &str = r"(?P<weekday>Mon|Tue|Wed|Thu|Fri|Sat|Sun)(?P<day>\d{1,2})";

/// The start of any day entry, whether or not a duty pattern follows.
static DAY_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WEEKDAY_DAY).expect("valid day start regex"));

static OFF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{WEEKDAY_DAY}(?P<code>O_[A-Z]\d?|OFF)")).expect("valid off regex")
});

static STANDBY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{WEEKDAY_DAY}(?P<code>(?:STBY|SBY|RSV)_[A-Z]\d?)(?P<station>[A-Z]{{3}})(?P<start>\d{{4}})(?P<end>\d{{4}})"
    ))
    .expect("valid standby regex")
});

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{WEEKDAY_DAY}C/I\d{{4}}(?P<legs>.*?)DP\d{{2}}:\d{{2}}"
    ))
    .expect("valid flight block regex")
});

static LEG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<deadhead>DH)?(?P<flight>[A-Z0-9]{2}\d{1,4}[A-Z]?)(?P<reissue>\*)?(?P<dep>[A-Z]{3})(?P<times>\d{8})(?P<arr>[A-Z]{3})",
    )
    .expect("valid leg regex")
});

/// A day off: weekday, day of month and off code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffToken<'a> {
    pub weekday: &'a str,
    pub day: &'a str,
    pub code: &'a str,
    pub raw: &'a str,
}

/// A standby at a station between two clock values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandbyToken<'a> {
    pub weekday: &'a str,
    pub day: &'a str,
    pub code: &'a str,
    pub station: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    pub raw: &'a str,
}

/// One flight leg inside a duty block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegToken<'a> {
    pub deadhead: bool,
    pub flight: &'a str,
    pub reissued: bool,
    pub departure: &'a str,
    /// Departure and arrival clock values, concatenated.
    pub times: &'a str,
    pub arrival: &'a str,
    pub raw: &'a str,
}

/// A flight-duty block from check-in to its duty-period annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightBlock<'a> {
    pub weekday: &'a str,
    pub day: &'a str,
    pub legs: Vec<LegToken<'a>>,
    pub raw: &'a str,
}

/// Everything the three pattern families found, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments<'a> {
    pub off_days: Vec<OffToken<'a>>,
    pub standbys: Vec<StandbyToken<'a>>,
    pub flight_blocks: Vec<FlightBlock<'a>>,
}

impl Segments<'_> {
    /// Total matched fragments, counting each leg separately.
    pub fn fragment_count(&self) -> usize {
        self.off_days.len()
            + self.standbys.len()
            + self.flight_blocks.len()
            + self.flight_blocks.iter().map(|b| b.legs.len()).sum::<usize>()
    }
}

/// Cut the roster table out of the normalised text.
///
/// Drops everything from the first end-of-roster marker on (a missing
/// marker is only a warning), then removes the table header.
pub fn extract_body(text: &str, log: &mut DiagnosticsLog) -> Result<String, ParseError> {
    let table = match END_MARKER_RE.find(text) {
        Some(marker) => {
            let discarded = &text[marker.start()..];
            log.ignored(
                format!(
                    "discarded {} characters of trailing summary",
                    discarded.chars().count()
                ),
                Some(marker.as_str()),
            );
            &text[..marker.start()]
        }
        None => {
            log.warning(
                "no end-of-roster marker found, scanning the full text",
                None,
            );
            text
        }
    };

    if table.is_empty() {
        return Err(ParseError::EmptySegment("after truncation"));
    }

    let body = if table.contains(HEADER_PREAMBLE) {
        table.replacen(HEADER_PREAMBLE, "", 1)
    } else {
        trace!("table header not present");
        table.to_string()
    };

    if body.is_empty() {
        return Err(ParseError::EmptySegment("after header removal"));
    }

    Ok(body)
}

/// Scan the body with all three pattern families.
///
/// Blocks without any leg token are logged as unparseable and dropped, as
/// is text inside a block that no leg matches and any day entry that none
/// of the three families matches. Fails if more fragments match than `config.max_fragments`; counting
/// stops as soon as the bound is crossed.
pub fn scan<'a>(
    body: &'a str,
    config: &ParserConfig,
    log: &mut DiagnosticsLog,
) -> Result<Segments<'a>, ParseError> {
    let mut budget = FragmentBudget::new(config.max_fragments);
    let mut segments = Segments::default();
    let mut covered: Vec<Range<usize>> = Vec::new();

    for caps in OFF_RE.captures_iter(body) {
        budget.take(1)?;
        if let Some(m) = caps.get(0) {
            covered.push(m.range());
        }
        segments.off_days.push(OffToken {
            weekday: caps.name("weekday").map_or("", |m| m.as_str()),
            day: caps.name("day").map_or("", |m| m.as_str()),
            code: caps.name("code").map_or("", |m| m.as_str()),
            raw: caps.get(0).map_or("", |m| m.as_str()),
        });
    }

    for caps in STANDBY_RE.captures_iter(body) {
        budget.take(1)?;
        if let Some(m) = caps.get(0) {
            covered.push(m.range());
        }
        segments.standbys.push(StandbyToken {
            weekday: caps.name("weekday").map_or("", |m| m.as_str()),
            day: caps.name("day").map_or("", |m| m.as_str()),
            code: caps.name("code").map_or("", |m| m.as_str()),
            station: caps.name("station").map_or("", |m| m.as_str()),
            start: caps.name("start").map_or("", |m| m.as_str()),
            end: caps.name("end").map_or("", |m| m.as_str()),
            raw: caps.get(0).map_or("", |m| m.as_str()),
        });
    }

    for caps in BLOCK_RE.captures_iter(body) {
        budget.take(1)?;
        let raw = caps.get(0).map_or("", |m| m.as_str());
        if let Some(m) = caps.get(0) {
            covered.push(m.range());
        }
        let legs_text = caps.name("legs").map_or("", |m| m.as_str());

        let (legs, gaps) = scan_legs(legs_text);
        budget.take(legs.len())?;

        if legs.is_empty() {
            log.unparseable("flight duty block contains no flight legs", raw);
            continue;
        }
        for gap in gaps {
            log.unparseable("text inside flight duty block matches no leg", gap);
        }

        segments.flight_blocks.push(FlightBlock {
            weekday: caps.name("weekday").map_or("", |m| m.as_str()),
            day: caps.name("day").map_or("", |m| m.as_str()),
            legs,
            raw,
        });
    }

    log_unmatched_days(body, &mut covered, log);

    debug!(
        off_days = segments.off_days.len(),
        standbys = segments.standbys.len(),
        flight_blocks = segments.flight_blocks.len(),
        fragments = segments.fragment_count(),
        "segmented roster body"
    );

    Ok(segments)
}

/// Match legs in a block body. Also returns the non-empty stretches of text
/// between, before and after the matched legs.
fn scan_legs(text: &str) -> (Vec<LegToken<'_>>, Vec<&str>) {
    let mut legs = Vec::new();
    let mut gaps = Vec::new();
    let mut last_end = 0;

    for caps in LEG_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last_end {
            gaps.push(&text[last_end..whole.start()]);
        }
        last_end = whole.end();

        legs.push(LegToken {
            deadhead: caps.name("deadhead").is_some(),
            flight: caps.name("flight").map_or("", |m| m.as_str()),
            reissued: caps.name("reissue").is_some(),
            departure: caps.name("dep").map_or("", |m| m.as_str()),
            times: caps.name("times").map_or("", |m| m.as_str()),
            arrival: caps.name("arr").map_or("", |m| m.as_str()),
            raw: whole.as_str(),
        });
    }
    if last_end < text.len() {
        gaps.push(&text[last_end..]);
    }

    (legs, gaps)
}

/// Log every weekday+day entry that starts outside all matched fragments.
///
/// The logged fragment runs up to the next day entry or matched fragment.
fn log_unmatched_days(body: &str, covered: &mut [Range<usize>], log: &mut DiagnosticsLog) {
    covered.sort_by_key(|r| r.start);
    let day_starts: Vec<usize> = DAY_START_RE.find_iter(body).map(|m| m.start()).collect();

    for (i, &start) in day_starts.iter().enumerate() {
        if covered.iter().any(|r| r.contains(&start)) {
            continue;
        }
        let next_day = day_starts.get(i + 1).copied().unwrap_or(body.len());
        let next_match = covered
            .iter()
            .map(|r| r.start)
            .find(|&s| s > start)
            .unwrap_or(body.len());

        trace!(start, "day entry outside every duty pattern");
        log.unparseable(
            "day entry matches no duty pattern",
            &body[start..next_day.min(next_match)],
        );
    }
}

/// Running count of matched fragments against the configured bound.
struct FragmentBudget {
    used: usize,
    limit: usize,
}

impl FragmentBudget {
    fn new(limit: usize) -> Self {
        Self { used: 0, limit }
    }

    fn take(&mut self, n: usize) -> Result<(), ParseError> {
        self.used += n;
        if self.used > self.limit {
            return Err(ParseError::TooManyFragments {
                found: self.used,
                limit: self.limit,
            });
        }
        Ok(())
    }
}
