//! Scheduled trip types.
//!
//! A `Trip` identifies one scheduled vehicle run (route, direction and the
//! service calendar it runs under). `TripTimes` pairs that identity with
//! the stop pattern it follows and an arrival/departure time at every stop.

use std::sync::Arc;

use super::{DomainError, RouteId, ServiceTime, StopIndex, StopPattern};

/// Identity of a scheduled trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trip {
    /// Trip identifier
    pub id: String,
    /// Route this trip belongs to
    pub route_id: RouteId,
    /// Direction of travel along the route, if known
    pub direction_id: Option<u8>,
    /// Index of the service calendar this trip runs under
    pub service_code: u32,
}

impl Trip {
    /// Creates a new trip identity.
    pub fn new(
        id: impl Into<String>,
        route_id: RouteId,
        direction_id: Option<u8>,
        service_code: u32,
    ) -> Self {
        Self {
            id: id.into(),
            route_id,
            direction_id,
            service_code,
        }
    }
}

/// Arrival and departure time at a single stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StopTime {
    pub arrival: ServiceTime,
    pub departure: ServiceTime,
}

impl StopTime {
    /// Creates a stop time.
    pub fn new(arrival: ServiceTime, departure: ServiceTime) -> Self {
        Self { arrival, departure }
    }

    /// Time spent at the stop, in seconds.
    pub fn dwell(&self) -> i32 {
        self.departure - self.arrival
    }
}

/// One scheduled instance of a stop pattern.
///
/// The number of stop times always equals the number of stops in the
/// pattern, and the pattern is never empty; both are checked at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripTimes {
    trip: Trip,
    pattern: Arc<StopPattern>,
    times: Vec<StopTime>,
}

impl TripTimes {
    /// Creates trip times, checking that they line up with the pattern.
    pub fn new(
        trip: Trip,
        pattern: Arc<StopPattern>,
        times: Vec<StopTime>,
    ) -> Result<Self, DomainError> {
        if pattern.is_empty() {
            return Err(DomainError::EmptyPattern(trip.id));
        }

        if times.len() != pattern.len() {
            return Err(DomainError::StopCountMismatch {
                trip_id: trip.id,
                times: times.len(),
                stops: pattern.len(),
            });
        }

        Ok(Self {
            trip,
            pattern,
            times,
        })
    }

    /// Creates a copy of this trip following the same pattern with new times.
    pub fn with_times(&self, times: Vec<StopTime>) -> Result<Self, DomainError> {
        Self::new(self.trip.clone(), Arc::clone(&self.pattern), times)
    }

    /// Returns the trip identity.
    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    /// Returns the route id.
    pub fn route_id(&self) -> &RouteId {
        &self.trip.route_id
    }

    /// Returns the direction id.
    pub fn direction_id(&self) -> Option<u8> {
        self.trip.direction_id
    }

    /// Returns the service calendar index.
    pub fn service_code(&self) -> u32 {
        self.trip.service_code
    }

    /// Returns the shared stop pattern.
    pub fn pattern(&self) -> &Arc<StopPattern> {
        &self.pattern
    }

    /// Returns all stop times in pattern order.
    pub fn stop_times(&self) -> &[StopTime] {
        &self.times
    }

    /// Returns the number of stops.
    pub fn num_stops(&self) -> usize {
        self.times.len()
    }

    /// Returns the arrival time at a stop.
    pub fn arrival_time(&self, idx: StopIndex) -> Option<ServiceTime> {
        self.times.get(idx.0).map(|st| st.arrival)
    }

    /// Returns the departure time at a stop.
    pub fn departure_time(&self, idx: StopIndex) -> Option<ServiceTime> {
        self.times.get(idx.0).map(|st| st.departure)
    }

    /// Returns the departure time from the first stop.
    pub fn first_departure(&self) -> ServiceTime {
        // Non-empty by construction
        self.times[0].departure
    }

    /// Returns the dwell time at a stop, in seconds.
    pub fn dwell_time(&self, idx: StopIndex) -> Option<i32> {
        self.times.get(idx.0).map(StopTime::dwell)
    }

    /// Returns the travel time from stop `idx` to the next stop, in seconds.
    pub fn hop_time(&self, idx: StopIndex) -> Option<i32> {
        let from = self.times.get(idx.0)?;
        let to = self.times.get(idx.next().0)?;
        Some(to.arrival - from.departure)
    }

    /// Returns true if times never decrease along the trip.
    pub fn is_monotonic(&self) -> bool {
        self.times.iter().all(|st| st.dwell() >= 0)
            && self
                .times
                .windows(2)
                .all(|pair| pair[1].arrival >= pair[0].departure)
    }
}
