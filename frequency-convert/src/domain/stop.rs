//! Stop and route identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop or route identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier {value:?}: {reason}")]
pub struct InvalidId {
    value: String,
    reason: &'static str,
}

fn check_id(s: &str) -> Result<(), InvalidId> {
    if s.is_empty() {
        return Err(InvalidId {
            value: s.to_string(),
            reason: "must not be empty",
        });
    }

    if s.trim() != s {
        return Err(InvalidId {
            value: s.to_string(),
            reason: "must not have surrounding whitespace",
        });
    }

    Ok(())
}

/// Identity of a physical transit stop.
///
/// Only equality matters when matching stops between patterns. The ordering
/// is lexicographic on the id and is what makes the choice of a common stop
/// reproducible.
///
/// # Examples
///
/// ```
/// use frequency_convert::domain::StopId;
///
/// let stop = StopId::parse("S1").unwrap();
/// assert_eq!(stop.as_str(), "S1");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse(" S1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id. It must be non-empty with no surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        check_id(s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check_id(&value)?;
        Ok(Self(value))
    }
}

impl From<StopId> for String {
    fn from(value: StopId) -> Self {
        value.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a transit route.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id. It must be non-empty with no surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        check_id(s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the route id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteId {
    type Error = InvalidId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check_id(&value)?;
        Ok(Self(value))
    }
}

impl From<RouteId> for String {
    fn from(value: RouteId) -> Self {
        value.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
