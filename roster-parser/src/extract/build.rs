//! Duty record construction.
//!
//! Turns matched fragments into `Duty` records. A fragment that cannot be
//! turned into a record is logged and skipped; it never stops the others.

use chrono::NaiveDate;

use super::segment::{FlightBlock, LegToken, OffToken, Segments, StandbyToken};
use super::{DateResolver, FragmentError};
use crate::diagnostics::DiagnosticsLog;
use crate::domain::{
    ClockTime, DomainError, Duty, DutyType, NewDuty, OperatorId, Station, TimeSpan,
    parse_clock_pair,
};

/// Accumulates duty records for one document.
pub struct RecordBuilder {
    resolver: DateResolver,
    operator: OperatorId,
    duties: Vec<Duty>,
}

impl RecordBuilder {
    pub fn new(resolver: DateResolver, operator: OperatorId) -> Self {
        Self {
            resolver,
            operator,
            duties: Vec::new(),
        }
    }

    /// Build records for every family, in order: off days, standbys,
    /// flight blocks.
    pub fn add_segments(&mut self, segments: &Segments<'_>, log: &mut DiagnosticsLog) {
        for token in &segments.off_days {
            self.add_off(token, log);
        }
        for token in &segments.standbys {
            self.add_standby(token, log);
        }
        for block in &segments.flight_blocks {
            self.add_flight_block(block, log);
        }
    }

    pub fn add_off(&mut self, token: &OffToken<'_>, log: &mut DiagnosticsLog) {
        match self.off_duty(token, log) {
            Ok(duty) => self.duties.push(duty),
            Err(e) => log.warning_with("skipping off day", Some(token.raw), &e),
        }
    }

    pub fn add_standby(&mut self, token: &StandbyToken<'_>, log: &mut DiagnosticsLog) {
        match self.standby_duty(token, log) {
            Ok(duty) => self.duties.push(duty),
            Err(e) => log.warning_with("skipping standby", Some(token.raw), &e),
        }
    }

    /// Add every leg of a block. If the block's date cannot be resolved the
    /// whole block is skipped; a bad leg only skips itself.
    pub fn add_flight_block(&mut self, block: &FlightBlock<'_>, log: &mut DiagnosticsLog) {
        let date = match self.resolve(block.weekday, block.day, block.raw, log) {
            Ok(date) => date,
            Err(e) => {
                log.warning_with("skipping flight duty block", Some(block.raw), &e);
                return;
            }
        };

        for leg in &block.legs {
            match self.leg_duty(date, leg, log) {
                Ok(duty) => self.duties.push(duty),
                Err(e) => log.warning_with("skipping flight leg", Some(leg.raw), &e),
            }
        }
    }

    /// Sort by date and log per-type counts.
    ///
    /// The sort is stable, so duties on the same date keep discovery order.
    pub fn finish(mut self, log: &mut DiagnosticsLog) -> Vec<Duty> {
        self.duties.sort_by_key(Duty::date);

        let counts: Vec<String> = DutyType::ALL
            .iter()
            .map(|ty| {
                let n = self.duties.iter().filter(|d| d.duty_type() == *ty).count();
                format!("{}={}", ty.as_str(), n)
            })
            .collect();
        log.edge_case(
            format!(
                "extracted {} duties ({})",
                self.duties.len(),
                counts.join(", ")
            ),
            None,
        );

        self.duties
    }

    fn resolve(
        &self,
        weekday: &str,
        day: &str,
        raw: &str,
        log: &mut DiagnosticsLog,
    ) -> Result<NaiveDate, FragmentError> {
        let resolved = self.resolver.resolve(weekday, day)?;
        if !resolved.weekday_matched {
            log.edge_case(
                format!(
                    "no month in the search window has {weekday} on day {day}; using {}",
                    resolved.date
                ),
                Some(raw),
            );
        }
        Ok(resolved.date)
    }

    fn off_duty(&self, token: &OffToken<'_>, log: &mut DiagnosticsLog) -> Result<Duty, FragmentError> {
        let date = self.resolve(token.weekday, token.day, token.raw, log)?;

        Ok(Duty::new(NewDuty {
            date,
            duty_type: DutyType::Off,
            sub_code: Some(token.code),
            flight_number: token.code,
            departure_station: None,
            arrival_station: None,
            span: TimeSpan::full_day(date),
            reissued: false,
            operator: self.operator,
            raw_token: token.raw,
        })?)
    }

    fn standby_duty(
        &self,
        token: &StandbyToken<'_>,
        log: &mut DiagnosticsLog,
    ) -> Result<Duty, FragmentError> {
        let date = self.resolve(token.weekday, token.day, token.raw, log)?;
        let station = Station::parse(token.station)?;
        let start = ClockTime::parse_hhmm(token.start)?;
        let end = ClockTime::parse_hhmm(token.end)?;
        let span = anchor(date, start, end)?;

        if span.overnight {
            log.edge_case(
                format!("standby ends after midnight on {}", span.end.date_naive()),
                Some(token.raw),
            );
        }

        Ok(Duty::new(NewDuty {
            date,
            duty_type: DutyType::Standby,
            sub_code: Some(token.code),
            flight_number: token.code,
            departure_station: Some(station),
            arrival_station: Some(station),
            span,
            reissued: false,
            operator: self.operator,
            raw_token: token.raw,
        })?)
    }

    fn leg_duty(
        &self,
        date: NaiveDate,
        leg: &LegToken<'_>,
        log: &mut DiagnosticsLog,
    ) -> Result<Duty, FragmentError> {
        let departure = Station::parse(leg.departure)?;
        let arrival = Station::parse(leg.arrival)?;
        let (dep_clock, arr_clock) = parse_clock_pair(leg.times)?;
        // Only the departure date is checked against the period.
        let span = anchor(date, dep_clock, arr_clock)?;

        if span.overnight {
            log.edge_case(
                format!("overnight leg arrives on {}", span.end.date_naive()),
                Some(leg.raw),
            );
        }

        let duty_type = if leg.deadhead {
            DutyType::Deadhead
        } else {
            DutyType::Flight
        };

        Ok(Duty::new(NewDuty {
            date,
            duty_type,
            sub_code: None,
            flight_number: leg.flight,
            departure_station: Some(departure),
            arrival_station: Some(arrival),
            span,
            reissued: leg.reissued,
            operator: self.operator,
            raw_token: leg.raw,
        })?)
    }
}

fn anchor(date: NaiveDate, start: ClockTime, end: ClockTime) -> Result<TimeSpan, DomainError> {
    TimeSpan::anchored(date, start, end).ok_or(DomainError::DateOverflow(date))
}
