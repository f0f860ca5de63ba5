//! Airport station codes.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code {input:?}: {reason}")]
pub struct InvalidStation {
    input: String,
    reason: &'static str,
}

/// Airport code from the roster's From/To columns, e.g. `LHR`.
///
/// Standby rows repeat the reporting station in both columns, so a standby
/// duty carries the same `Station` twice.
///
/// ```
/// use roster_parser::domain::Station;
///
/// assert_eq!(Station::parse("LHR").unwrap().to_string(), "LHR");
/// assert!(Station::parse("lhr").is_err());
/// assert!(Station::parse("LHRX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Station([u8; 3]);

impl Station {
    /// Accepts exactly three bytes in `A..=Z`.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        let reject = |reason| InvalidStation {
            input: s.to_string(),
            reason,
        };

        match s.as_bytes() {
            &[a, b, c] if [a, b, c].iter().all(u8::is_ascii_uppercase) => Ok(Station([a, b, c])),
            &[_, _, _] => Err(reject("must be uppercase ASCII letters A-Z")),
            _ => Err(reject("must be exactly 3 characters")),
        }
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({})", self.as_str())
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Station {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
