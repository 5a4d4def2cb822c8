//! Scenario file DTOs.
//!
//! These types map directly to the JSON scenario and output files. Times
//! are seconds since the reference midnight. Identifiers are validated on
//! deserialization; stop-count consistency is checked when loading into
//! the domain.

use serde::{Deserialize, Serialize};

use crate::convert::{Conversion, ConversionConfig, Diagnostic, SkipReason};
use crate::domain::{FrequencyEntry, RouteId, ServiceActiveSet, ServiceTime, StopId, TripTimes};

/// A timetable plus the modification to apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Service codes running on the day being converted.
    #[serde(default)]
    pub active_services: ServiceActiveSet,

    /// Scheduled trips.
    #[serde(default)]
    pub trips: Vec<TripDto>,

    /// Frequency entries already in the timetable.
    #[serde(default)]
    pub frequencies: Vec<FrequencyDto>,

    /// The modification to apply.
    pub modification: Modification,
}

/// A timetable modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Modification {
    /// Replace scheduled trips with frequency entries.
    ConvertToFrequency(ConversionConfig),
}

impl Modification {
    /// Conversion parameters of this modification.
    pub fn config(&self) -> &ConversionConfig {
        match self {
            Modification::ConvertToFrequency(config) => config,
        }
    }

    pub fn config_mut(&mut self) -> &mut ConversionConfig {
        match self {
            Modification::ConvertToFrequency(config) => config,
        }
    }
}

/// One scheduled trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDto {
    pub trip_id: String,

    pub route_id: RouteId,

    /// GTFS direction, usually 0 or 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction_id: Option<u8>,

    pub service_code: u32,

    /// Stops in visiting order.
    pub stops: Vec<StopId>,

    /// `[arrival, departure]` at each stop.
    pub times: Vec<(ServiceTime, ServiceTime)>,
}

impl From<&TripTimes> for TripDto {
    fn from(trip: &TripTimes) -> Self {
        Self {
            trip_id: trip.trip().id.clone(),
            route_id: trip.route_id().clone(),
            direction_id: trip.direction_id(),
            service_code: trip.service_code(),
            stops: trip.pattern().stops().to_vec(),
            times: trip
                .stop_times()
                .iter()
                .map(|st| (st.arrival, st.departure))
                .collect(),
        }
    }
}

/// A frequency entry with its template trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyDto {
    pub start_time: ServiceTime,
    pub end_time: ServiceTime,
    pub headway_secs: i32,
    #[serde(default)]
    pub exact_times: bool,
    pub trip: TripDto,
}

impl From<&FrequencyEntry> for FrequencyDto {
    fn from(entry: &FrequencyEntry) -> Self {
        Self {
            start_time: entry.start_time,
            end_time: entry.end_time,
            headway_secs: entry.headway_secs,
            exact_times: entry.exact_times,
            trip: TripDto::from(&entry.trip),
        }
    }
}

/// A group that was left unconverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticDto {
    pub group: String,
    /// Machine-readable reason, e.g. `single_trip`.
    pub reason: String,
    /// Human-readable explanation.
    pub message: String,
    /// Trips left in the group after filtering.
    pub trips: usize,
}

impl From<&Diagnostic> for DiagnosticDto {
    fn from(diagnostic: &Diagnostic) -> Self {
        let reason = match diagnostic.reason {
            SkipReason::EmptyAfterFilter => "empty_after_filter",
            SkipReason::SingleTrip => "single_trip",
            SkipReason::NoDominantPattern => "no_dominant_pattern",
            SkipReason::NoCommonStop { .. } => "no_common_stop",
            SkipReason::NoHeadway { .. } => "no_headway",
            SkipReason::InvalidEntry(_) => "invalid_entry",
        };
        Self {
            group: diagnostic.group.clone(),
            reason: reason.to_string(),
            message: diagnostic.reason.to_string(),
            trips: diagnostic.trips,
        }
    }
}

/// The converted timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub active_services: ServiceActiveSet,
    pub trips: Vec<TripDto>,
    pub frequencies: Vec<FrequencyDto>,
    pub diagnostics: Vec<DiagnosticDto>,
}

impl ScenarioOutput {
    pub fn new(active_services: ServiceActiveSet, conversion: &Conversion) -> Self {
        Self {
            active_services,
            trips: conversion.scheduled_trips.iter().map(TripDto::from).collect(),
            frequencies: conversion
                .frequency_entries
                .iter()
                .map(FrequencyDto::from)
                .collect(),
            diagnostics: conversion.diagnostics.iter().map(DiagnosticDto::from).collect(),
        }
    }
}
