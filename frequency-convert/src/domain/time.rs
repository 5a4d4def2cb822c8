//! Service-day time handling.
//!
//! Timetables express times as seconds since a reference midnight. Service
//! that runs past midnight keeps counting, so "25:10:00" is a valid time on
//! the same service day. Window arithmetic may also push a time below zero,
//! so values are signed. Arithmetic operators saturate at the `i32` bounds.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Seconds since the reference midnight of a service day.
///
/// # Examples
///
/// ```
/// use frequency_convert::domain::ServiceTime;
///
/// let t = ServiceTime::parse_hms("08:15:00").unwrap();
/// assert_eq!(t.seconds(), 8 * 3600 + 15 * 60);
/// assert_eq!(t.to_string(), "08:15:00");
///
/// // Post-midnight service stays on the same service day
/// let late = ServiceTime::parse_hms("25:10:00").unwrap();
/// assert_eq!(late.seconds(), 25 * 3600 + 10 * 60);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceTime(i32);

impl ServiceTime {
    /// The reference midnight.
    pub const MIDNIGHT: ServiceTime = ServiceTime(0);

    /// Earliest representable time.
    pub const MIN: ServiceTime = ServiceTime(i32::MIN);

    /// Latest representable time.
    pub const MAX: ServiceTime = ServiceTime(i32::MAX);

    /// Create a time from seconds since the reference midnight.
    pub const fn from_seconds(seconds: i32) -> Self {
        Self(seconds)
    }

    /// Create a time from hours, minutes and seconds.
    pub const fn from_hms(hours: i32, minutes: i32, seconds: i32) -> Self {
        Self(hours * 3600 + minutes * 60 + seconds)
    }

    /// Parse a time in "H:MM:SS" or "HH:MM:SS" format.
    ///
    /// Hours may exceed 23 for service running past midnight.
    ///
    /// # Examples
    ///
    /// ```
    /// use frequency_convert::domain::ServiceTime;
    ///
    /// assert!(ServiceTime::parse_hms("00:00:00").is_ok());
    /// assert!(ServiceTime::parse_hms("7:05:00").is_ok());
    /// assert!(ServiceTime::parse_hms("26:59:59").is_ok());
    ///
    /// assert!(ServiceTime::parse_hms("08:00").is_err());
    /// assert!(ServiceTime::parse_hms("08:60:00").is_err());
    /// assert!(ServiceTime::parse_hms("08:00:6").is_err());
    /// ```
    pub fn parse_hms(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected HH:MM:SS format"));
        };

        if h.is_empty() || h.len() > 3 || !h.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::new("invalid hour digits"));
        }
        let hours: i32 = h
            .parse()
            .map_err(|_| TimeError::new("invalid hour digits"))?;

        let minutes =
            parse_two_digits(m.as_bytes()).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minutes > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let seconds = parse_two_digits(sec.as_bytes())
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if seconds > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Ok(Self::from_hms(hours, minutes, seconds))
    }

    /// Returns the number of seconds since the reference midnight.
    pub const fn seconds(self) -> i32 {
        self.0
    }

    /// Returns the signed duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(self, other: Self) -> Duration {
        Duration::seconds(i64::from(self.0) - i64::from(other.0))
    }

    /// Add a number of seconds, returning `None` on overflow.
    pub fn checked_add_seconds(self, seconds: i32) -> Option<Self> {
        self.0.checked_add(seconds).map(Self)
    }

    /// Returns true if this time lies strictly inside `(start, end)`.
    pub fn is_strictly_between(self, start: Self, end: Self) -> bool {
        start < self && self < end
    }
}

impl Add<i32> for ServiceTime {
    type Output = Self;

    fn add(self, rhs: i32) -> Self::Output {
        Self(self.0.saturating_add(rhs))
    }
}

impl Sub<i32> for ServiceTime {
    type Output = Self;

    fn sub(self, rhs: i32) -> Self::Output {
        Self(self.0.saturating_sub(rhs))
    }
}

/// Difference in whole seconds, saturating at the `i32` bounds.
///
/// Use [`ServiceTime::signed_duration_since`] for the exact difference.
impl Sub for ServiceTime {
    type Output = i32;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceTime({self})")
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let total = self.0.unsigned_abs();
        write!(
            f,
            "{sign}{:02}:{:02}:{:02}",
            total / 3600,
            (total / 60) % 60,
            total % 60
        )
    }
}

/// Parse two ASCII digit bytes into an i32.
fn parse_two_digits(bytes: &[u8]) -> Option<i32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some((d1 * 10 + d2) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        assert_eq!(ServiceTime::parse_hms("00:00:00").unwrap().seconds(), 0);
        assert_eq!(ServiceTime::parse_hms("07:00:00").unwrap().seconds(), 25_200);
        assert_eq!(ServiceTime::parse_hms("7:00:00").unwrap().seconds(), 25_200);
        assert_eq!(ServiceTime::parse_hms("23:59:59").unwrap().seconds(), 86_399);
    }

    #[test]
    fn parse_past_midnight() {
        let t = ServiceTime::parse_hms("24:30:00").unwrap();
        assert_eq!(t.seconds(), 86_400 + 1_800);
    }

    #[test]
    fn reject_bad_formats() {
        assert!(ServiceTime::parse_hms("").is_err());
        assert!(ServiceTime::parse_hms("08:00").is_err());
        assert!(ServiceTime::parse_hms("08:00:00:00").is_err());
        assert!(ServiceTime::parse_hms("ab:00:00").is_err());
        assert!(ServiceTime::parse_hms(":00:00").is_err());
        assert!(ServiceTime::parse_hms("-1:00:00").is_err());
        assert!(ServiceTime::parse_hms("08:0:00").is_err());
    }

    #[test]
    fn reject_out_of_range() {
        assert!(ServiceTime::parse_hms("08:60:00").is_err());
        assert!(ServiceTime::parse_hms("08:00:60").is_err());
    }

    #[test]
    fn error_display() {
        let err = ServiceTime::parse_hms("08:61:00").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: minute must be 0-59");
    }

    #[test]
    fn display_formats() {
        assert_eq!(ServiceTime::from_hms(8, 5, 3).to_string(), "08:05:03");
        assert_eq!(ServiceTime::from_hms(25, 0, 0).to_string(), "25:00:00");
        assert_eq!(ServiceTime::from_seconds(-3600).to_string(), "-01:00:00");
        assert_eq!(
            format!("{:?}", ServiceTime::from_hms(8, 0, 0)),
            "ServiceTime(08:00:00)"
        );
    }

    #[test]
    fn arithmetic() {
        let t = ServiceTime::from_hms(8, 0, 0);
        assert_eq!((t + 900).to_string(), "08:15:00");
        assert_eq!((t - 10_800).to_string(), "05:00:00");
        assert_eq!(ServiceTime::from_hms(8, 15, 0) - t, 900);
        assert_eq!(t.checked_add_seconds(i32::MAX), None);
    }

    #[test]
    fn arithmetic_saturates() {
        let early = ServiceTime::from_seconds(i32::MIN + 5);
        assert_eq!(early - 10_800, ServiceTime::MIN);
        assert_eq!(ServiceTime::MAX + 1, ServiceTime::MAX);
        assert_eq!(ServiceTime::MAX - ServiceTime::MIN, i32::MAX);
        assert_eq!(ServiceTime::MIN - ServiceTime::MAX, i32::MIN);
        assert_eq!(
            ServiceTime::MAX.signed_duration_since(ServiceTime::MIN),
            Duration::seconds(i64::from(i32::MAX) - i64::from(i32::MIN))
        );
    }

    #[test]
    fn signed_duration() {
        let a = ServiceTime::from_hms(8, 0, 0);
        let b = ServiceTime::from_hms(8, 30, 0);
        assert_eq!(b.signed_duration_since(a), Duration::minutes(30));
        assert_eq!(a.signed_duration_since(b), Duration::minutes(-30));
    }

    #[test]
    fn strictly_between_excludes_bounds() {
        let start = ServiceTime::from_hms(7, 0, 0);
        let end = ServiceTime::from_hms(10, 0, 0);

        assert!(ServiceTime::from_hms(8, 0, 0).is_strictly_between(start, end));
        assert!(!start.is_strictly_between(start, end));
        assert!(!end.is_strictly_between(start, end));
        assert!(!ServiceTime::from_hms(6, 0, 0).is_strictly_between(start, end));
    }

    #[test]
    fn serde_is_plain_seconds() {
        let t = ServiceTime::from_hms(1, 0, 0);
        assert_eq!(serde_json::to_string(&t).unwrap(), "3600");
        let back: ServiceTime = serde_json::from_str("3600").unwrap();
        assert_eq!(back, t);
    }
}
