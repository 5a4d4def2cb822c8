//! Conversion of a single trip group into a frequency entry.

use std::fmt;

use chrono::Duration;
use tracing::info;

use crate::domain::{DomainError, FrequencyEntry, ServiceActiveSet, StopId, TripTimes};

use super::config::ConversionConfig;
use super::group::GroupKey;
use super::headway::{headways, median_headway, sample_arrivals};
use super::profile::synthesize_template;
use super::selection::{common_stop, dominant_pattern, pattern_counts};

/// Why a group was not converted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// No trip runs inside the window; the group's trips are discarded
    #[error("no active trips depart inside the window")]
    EmptyAfterFilter,

    /// Only one trip runs inside the window
    #[error("only one active trip departs inside the window")]
    SingleTrip,

    /// No trip follows a most frequent pattern
    #[error("no trip follows a dominant pattern")]
    NoDominantPattern,

    /// The group's patterns share no stop to measure headways at
    #[error("no stop is common to all {patterns} patterns")]
    NoCommonStop { patterns: usize },

    /// Fewer than two arrivals at the common stop
    #[error("fewer than two arrivals at common stop {stop}")]
    NoHeadway { stop: StopId },

    /// The template trip could not be built
    #[error("cannot build frequency entry: {0}")]
    InvalidEntry(DomainError),
}

/// A group that was not converted, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Display form of the group key
    pub group: String,
    /// Why the group was skipped
    pub reason: SkipReason,
    /// Number of trips that passed the active/window filter
    pub trips: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "group {} ({} trips) not converted: {}",
            self.group, self.trips, self.reason
        )
    }
}

/// Result of converting one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    /// The group was replaced by a frequency entry
    Converted(FrequencyEntry),

    /// The group was left as scheduled trips.
    ///
    /// `trips` are the filtered trips to pass through unchanged. It is empty
    /// when no trip survived the filter, in which case the whole group is
    /// dropped from the output.
    Skipped {
        trips: Vec<TripTimes>,
        reason: SkipReason,
    },
}

impl GroupOutcome {
    fn skipped(trips: &[&TripTimes], reason: SkipReason) -> Self {
        GroupOutcome::Skipped {
            trips: trips.iter().map(|&t| t.clone()).collect(),
            reason,
        }
    }

    /// Diagnostic for a skipped group.
    pub fn diagnostic(&self, key: &GroupKey) -> Option<Diagnostic> {
        match self {
            GroupOutcome::Converted(_) => None,
            GroupOutcome::Skipped { trips, reason } => Some(Diagnostic {
                group: key.to_string(),
                reason: reason.clone(),
                trips: trips.len(),
            }),
        }
    }
}

/// Convert one group of scheduled trips.
///
/// Only trips whose service is active and whose first departure is strictly
/// inside the window take part. Every failure is reported through
/// [`GroupOutcome::Skipped`] rather than an error.
pub fn synthesize_group(
    key: &GroupKey,
    trips: &[&TripTimes],
    active: &ServiceActiveSet,
    config: &ConversionConfig,
) -> GroupOutcome {
    let group: Vec<&TripTimes> = trips
        .iter()
        .copied()
        .filter(|trip| active.contains(trip.service_code()))
        .filter(|trip| config.in_window(trip.first_departure()))
        .collect();

    match group.len() {
        0 => return GroupOutcome::skipped(&group, SkipReason::EmptyAfterFilter),
        1 => return GroupOutcome::skipped(&group, SkipReason::SingleTrip),
        _ => {}
    }

    let counts = pattern_counts(&group);
    let Some(dominant) = dominant_pattern(&counts) else {
        return GroupOutcome::skipped(&group, SkipReason::NoDominantPattern);
    };

    let Some(stop) = common_stop(counts.keys().map(|&p| &**p)) else {
        return GroupOutcome::skipped(
            &group,
            SkipReason::NoCommonStop {
                patterns: counts.len(),
            },
        );
    };

    let arrivals = sample_arrivals(&group, &stop, config);
    let Some(headway) = median_headway(&headways(&arrivals)) else {
        return GroupOutcome::skipped(&group, SkipReason::NoHeadway { stop });
    };

    let candidates: Vec<&TripTimes> = group
        .iter()
        .copied()
        .filter(|trip| trip.pattern() == dominant)
        .collect();

    let template = match synthesize_template(&candidates) {
        Ok(Some(template)) => template,
        Ok(None) => return GroupOutcome::skipped(&group, SkipReason::NoDominantPattern),
        Err(e) => return GroupOutcome::skipped(&group, SkipReason::InvalidEntry(e)),
    };

    let entry = FrequencyEntry::synthesized(
        config.frequency_start(),
        config.window_end,
        headway,
        false,
        template,
    );

    let sampled = match (arrivals.first(), arrivals.last()) {
        (Some(first), Some(last)) => last.signed_duration_since(*first),
        _ => Duration::zero(),
    };
    info!(
        group = %key,
        route = %entry.trip.route_id(),
        direction = ?entry.trip.direction_id(),
        common_stop = %stop,
        headway_mins = Duration::seconds(i64::from(headway)).num_minutes(),
        sampled_mins = sampled.num_minutes(),
        departures = entry.num_departures(),
        "converted group to frequency"
    );

    GroupOutcome::Converted(entry)
}
