//! Frequency-based service descriptions.

use super::{DomainError, ServiceTime, TripTimes};

/// A headway plus a template trip repeated at that headway.
///
/// The template's times are relative: vehicles leave the first stop at
/// `start_time`, `start_time + headway`, ... strictly before `end_time`,
/// each following the template's hop and dwell profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    /// First departure of the window
    pub start_time: ServiceTime,
    /// End of the window (exclusive)
    pub end_time: ServiceTime,
    /// Seconds between departures
    pub headway_secs: i32,
    /// Whether departures follow the headway exactly, or only on average
    pub exact_times: bool,
    /// Timed template
    pub trip: TripTimes,
}

impl FrequencyEntry {
    /// Creates a frequency entry, checking headway and window.
    pub fn new(
        start_time: ServiceTime,
        end_time: ServiceTime,
        headway_secs: i32,
        exact_times: bool,
        trip: TripTimes,
    ) -> Result<Self, DomainError> {
        let entry = Self {
            start_time,
            end_time,
            headway_secs,
            exact_times,
            trip,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Creates an entry from a measured headway without validating it.
    ///
    /// Trips that depart together measure a headway of zero, which is kept
    /// as is. Such an entry expands to no departures.
    pub fn synthesized(
        start_time: ServiceTime,
        end_time: ServiceTime,
        headway_secs: i32,
        exact_times: bool,
        trip: TripTimes,
    ) -> Self {
        Self {
            start_time,
            end_time,
            headway_secs,
            exact_times,
            trip,
        }
    }

    /// Check that the headway is positive and the window is not empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.headway_secs <= 0 {
            return Err(DomainError::InvalidHeadway(self.headway_secs));
        }
        if self.end_time <= self.start_time {
            return Err(DomainError::InvalidWindow {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    /// Departure times from the first stop within the window.
    ///
    /// Yields nothing if the headway is not positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use frequency_convert::domain::{
    ///     FrequencyEntry, RouteId, ServiceTime, StopId, StopPattern, StopTime, Trip, TripTimes,
    /// };
    ///
    /// let pattern = Arc::new(StopPattern::new(vec![StopId::parse("A").unwrap()]));
    /// let trip = Trip::new("T1", RouteId::parse("R1").unwrap(), None, 0);
    /// let zero = StopTime::new(ServiceTime::MIDNIGHT, ServiceTime::MIDNIGHT);
    /// let template = TripTimes::new(trip, pattern, vec![zero]).unwrap();
    ///
    /// let entry = FrequencyEntry::new(
    ///     ServiceTime::from_hms(8, 0, 0),
    ///     ServiceTime::from_hms(9, 0, 0),
    ///     1200,
    ///     false,
    ///     template,
    /// )
    /// .unwrap();
    ///
    /// let departures: Vec<String> = entry.departure_times().map(|t| t.to_string()).collect();
    /// assert_eq!(departures, ["08:00:00", "08:20:00", "08:40:00"]);
    /// ```
    pub fn departure_times(&self) -> impl Iterator<Item = ServiceTime> + '_ {
        let step = self.headway_secs;
        std::iter::successors(Some(self.start_time), move |t| t.checked_add_seconds(step))
            .take_while(move |t| step > 0 && *t < self.end_time)
    }

    /// Number of departures within the window.
    pub fn num_departures(&self) -> usize {
        let span = self.end_time.signed_duration_since(self.start_time).num_seconds();
        let step = i64::from(self.headway_secs);
        if step <= 0 || span <= 0 {
            return 0;
        }
        // Ceiling division: departures at start, start + step, ... below end
        usize::try_from((span + step - 1) / step).unwrap_or(usize::MAX)
    }
}
