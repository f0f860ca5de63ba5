//! Duty record type.
//!
//! A `Duty` is one roster entry: a day off, a standby at a station, or one
//! flight leg (operated or as a deadheading passenger).

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{DomainError, OperatorId, Station, TimeSpan};

/// Kind of duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyType {
    Off,
    Standby,
    Flight,
    Deadhead,
}

impl DutyType {
    /// All duty types, in summary order.
    pub const ALL: [DutyType; 4] = [
        DutyType::Off,
        DutyType::Standby,
        DutyType::Flight,
        DutyType::Deadhead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DutyType::Off => "OFF",
            DutyType::Standby => "STANDBY",
            DutyType::Flight => "FLIGHT",
            DutyType::Deadhead => "DEADHEAD",
        }
    }
}

/// Field values for constructing a [`Duty`].
#[derive(Debug, Clone)]
pub struct NewDuty<'a> {
    pub date: NaiveDate,
    pub duty_type: DutyType,
    /// Raw off or standby code, if any.
    pub sub_code: Option<&'a str>,
    /// Flight number, or the off/standby code for non-flying duties.
    pub flight_number: &'a str,
    pub departure_station: Option<Station>,
    pub arrival_station: Option<Station>,
    pub span: TimeSpan,
    pub reissued: bool,
    pub operator: OperatorId,
    /// The matched text the duty was built from.
    pub raw_token: &'a str,
}

/// One roster entry with absolute UTC times.
///
/// # Invariants
///
/// - `departure_time <= arrival_time`
/// - `departure_time` falls on `date`
/// - Stations are either both present or both absent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Duty {
    id: Uuid,
    date: NaiveDate,
    #[serde(rename = "type")]
    duty_type: DutyType,
    sub_code: Option<String>,
    flight_number: String,
    departure_station: Option<Station>,
    arrival_station: Option<Station>,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    annotation: Option<String>,
    source_key: String,
    reissued: bool,
}

impl Duty {
    /// Construct a duty with a freshly generated identifier.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the span ends before it starts, the span does not
    /// start on `date`, or only one of the two stations is given.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_parser::domain::{Duty, DutyType, NewDuty, OperatorId, TimeSpan};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    /// let duty = Duty::new(NewDuty {
    ///     date,
    ///     duty_type: DutyType::Off,
    ///     sub_code: Some("O_M"),
    ///     flight_number: "O_M",
    ///     departure_station: None,
    ///     arrival_station: None,
    ///     span: TimeSpan::full_day(date),
    ///     reissued: false,
    ///     operator: OperatorId::parse("123456").unwrap(),
    ///     raw_token: "Mon01O_M",
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(duty.source_key(), "123456-2024-04-01-Mon01O_M");
    /// ```
    pub fn new(fields: NewDuty<'_>) -> Result<Self, DomainError> {
        if fields.span.start > fields.span.end {
            return Err(DomainError::InvalidDuty("arrival must not precede departure"));
        }
        if fields.span.start.date_naive() != fields.date {
            return Err(DomainError::InvalidDuty("departure must fall on the duty date"));
        }
        if fields.departure_station.is_some() != fields.arrival_station.is_some() {
            return Err(DomainError::InvalidDuty(
                "departure and arrival stations must both be present or both absent",
            ));
        }

        Ok(Duty {
            id: Uuid::new_v4(),
            date: fields.date,
            duty_type: fields.duty_type,
            sub_code: fields.sub_code.map(str::to_string),
            flight_number: fields.flight_number.to_string(),
            departure_station: fields.departure_station,
            arrival_station: fields.arrival_station,
            departure_time: fields.span.start,
            arrival_time: fields.span.end,
            annotation: None,
            source_key: format!(
                "{}-{}-{}",
                fields.operator,
                fields.date.format("%Y-%m-%d"),
                fields.raw_token
            ),
            reissued: fields.reissued,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn duty_type(&self) -> DutyType {
        self.duty_type
    }

    pub fn sub_code(&self) -> Option<&str> {
        self.sub_code.as_deref()
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn departure_station(&self) -> Option<Station> {
        self.departure_station
    }

    pub fn arrival_station(&self) -> Option<Station> {
        self.arrival_station
    }

    pub fn departure_time(&self) -> DateTime<Utc> {
        self.departure_time
    }

    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.arrival_time
    }

    /// Free-form remarks. Always `None` for now.
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// Operator identifier, date and raw token joined with `-`.
    ///
    /// Not unique: two identical tokens on the same date share a key.
    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    /// Whether the leg carried the reissue marker.
    pub fn reissued(&self) -> bool {
        self.reissued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClockTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    fn flight_fields<'a>(d: NaiveDate, span: TimeSpan) -> NewDuty<'a> {
        NewDuty {
            date: d,
            duty_type: DutyType::Flight,
            sub_code: None,
            flight_number: "BA1234",
            departure_station: Some(Station::parse("LHR").unwrap()),
            arrival_station: Some(Station::parse("JFK").unwrap()),
            span,
            reissued: false,
            operator: OperatorId::parse("123456").unwrap(),
            raw_token: "BA1234LHR06000700JFK",
        }
    }

    #[test]
    fn builds_flight() {
        let d = date(2024, 4, 3);
        let span = TimeSpan::anchored(d, clock("0600"), clock("0700")).unwrap();
        let duty = Duty::new(flight_fields(d, span)).unwrap();

        assert_eq!(duty.duty_type(), DutyType::Flight);
        assert_eq!(duty.flight_number(), "BA1234");
        assert_eq!(duty.departure_station().unwrap().as_str(), "LHR");
        assert_eq!(duty.arrival_station().unwrap().as_str(), "JFK");
        assert_eq!(duty.annotation(), None);
        assert!(duty.departure_time() <= duty.arrival_time());
    }

    #[test]
    fn identifiers_are_fresh() {
        let d = date(2024, 4, 3);
        let span = TimeSpan::anchored(d, clock("0600"), clock("0700")).unwrap();
        let a = Duty::new(flight_fields(d, span)).unwrap();
        let b = Duty::new(flight_fields(d, span)).unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(a.source_key(), b.source_key());
    }

    #[test]
    fn rejects_reversed_span() {
        let d = date(2024, 4, 3);
        let span = TimeSpan {
            start: clock("0700").on(d),
            end: clock("0600").on(d),
            overnight: false,
        };
        let err = Duty::new(flight_fields(d, span)).unwrap_err();
        assert_eq!(err.to_string(), "invalid duty: arrival must not precede departure");
    }

    #[test]
    fn rejects_departure_off_date() {
        let d = date(2024, 4, 3);
        let span = TimeSpan::anchored(date(2024, 4, 4), clock("0600"), clock("0700")).unwrap();
        assert!(Duty::new(flight_fields(d, span)).is_err());
    }

    #[test]
    fn rejects_one_sided_stations() {
        let d = date(2024, 4, 3);
        let span = TimeSpan::anchored(d, clock("0600"), clock("0700")).unwrap();
        let mut fields = flight_fields(d, span);
        fields.arrival_station = None;
        assert!(Duty::new(fields).is_err());
    }

    #[test]
    fn serializes_with_document_field_names() {
        let d = date(2024, 4, 3);
        let span = TimeSpan::anchored(d, clock("2300"), clock("0100")).unwrap();
        let mut fields = flight_fields(d, span);
        fields.duty_type = DutyType::Deadhead;
        let duty = Duty::new(fields).unwrap();

        let json = serde_json::to_value(&duty).unwrap();
        assert_eq!(json["type"], "DEADHEAD");
        assert_eq!(json["date"], "2024-04-03");
        assert_eq!(json["departureStation"], "LHR");
        assert_eq!(json["arrivalTime"], "2024-04-04T01:00:00Z");
        assert_eq!(json["annotation"], serde_json::Value::Null);
        assert_eq!(json["sourceKey"], "123456-2024-04-03-BA1234LHR06000700JFK");
    }
}
