//! Crew member (operator) identifier type.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid operator identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid operator identifier: {reason}")]
pub struct InvalidOperatorId {
    reason: &'static str,
}

/// The 6-digit code identifying the crew member a roster belongs to.
///
/// # Examples
///
/// ```
/// use roster_parser::domain::OperatorId;
///
/// let id = OperatorId::parse("123456").unwrap();
/// assert_eq!(id.as_str(), "123456");
///
/// assert!(OperatorId::parse("12345").is_err());
/// assert!(OperatorId::parse("12345A").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorId([u8; 6]);

impl OperatorId {
    /// Parse an identifier from exactly 6 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidOperatorId> {
        let bytes: [u8; 6] = s.as_bytes().try_into().map_err(|_| InvalidOperatorId {
            reason: "must be exactly 6 characters",
        })?;

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidOperatorId {
                reason: "must be ASCII digits 0-9",
            });
        }

        Ok(OperatorId(bytes))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperatorId({})", self.as_str())
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OperatorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
