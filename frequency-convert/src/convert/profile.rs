//! Synthesis of a canonical trip profile.
//!
//! The template trip of a frequency entry follows the dominant pattern with
//! each hop and dwell set to the mean over every trip on that pattern.
//! Times start at zero; the frequency entry supplies the actual departures.

use crate::domain::{DomainError, ServiceTime, StopIndex, StopTime, TripTimes};

/// Mean travel times along a pattern, in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelProfile {
    /// Mean dwell at each stop (one per stop)
    pub dwells: Vec<i32>,
    /// Mean hop from each stop to the next (one fewer than stops)
    pub hops: Vec<i32>,
}

impl TravelProfile {
    /// Mean dwell and hop times across trips that all follow one pattern.
    ///
    /// Means are truncated toward zero. Returns `None` for an empty slice.
    pub fn from_trips(trips: &[&TripTimes]) -> Option<Self> {
        let first = trips.first()?;
        let stops = first.num_stops();

        let dwells = (0..stops)
            .map(|i| truncated_mean(trips, |trip| trip.dwell_time(StopIndex(i))))
            .collect();
        let hops = (0..stops.saturating_sub(1))
            .map(|i| truncated_mean(trips, |trip| trip.hop_time(StopIndex(i))))
            .collect();

        Some(Self { dwells, hops })
    }

    /// Stop times obtained by accumulating dwells and hops from zero.
    ///
    /// The running total saturates at the `i32` bounds.
    pub fn stop_times(&self) -> Vec<StopTime> {
        let mut cumulative: i32 = 0;
        let mut times = Vec::with_capacity(self.dwells.len());

        for (i, dwell) in self.dwells.iter().enumerate() {
            let arrival = ServiceTime::from_seconds(cumulative);
            cumulative = cumulative.saturating_add(*dwell);
            times.push(StopTime::new(arrival, ServiceTime::from_seconds(cumulative)));

            if let Some(hop) = self.hops.get(i) {
                cumulative = cumulative.saturating_add(*hop);
            }
        }

        times
    }
}

/// Mean of `value` over `trips`, ignoring trips where it is missing.
fn truncated_mean<F>(trips: &[&TripTimes], value: F) -> i32
where
    F: Fn(&TripTimes) -> Option<i32>,
{
    let (sum, count) = trips
        .iter()
        .filter_map(|&trip| value(trip))
        .fold((0i64, 0i64), |(sum, count), v| (sum + i64::from(v), count + 1));

    if count == 0 {
        return 0;
    }
    // Each value fits in i32, so their mean does too
    (sum / count) as i32
}

/// Build the template trip for a set of trips sharing one pattern.
///
/// The template keeps the identity of the first trip. Returns `Ok(None)`
/// when `candidates` is empty.
pub fn synthesize_template(candidates: &[&TripTimes]) -> Result<Option<TripTimes>, DomainError> {
    let (Some(first), Some(profile)) = (candidates.first(), TravelProfile::from_trips(candidates))
    else {
        return Ok(None);
    };
    first.with_times(profile.stop_times()).map(Some)
}
