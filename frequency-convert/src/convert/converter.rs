//! Whole-timetable conversion.

use rayon::prelude::*;
use tracing::info;

use crate::domain::{FrequencyEntry, ServiceActiveSet, TripTimes};

use super::config::{ConfigError, ConversionConfig};
use super::group::partition;
use super::synthesize::{Diagnostic, GroupOutcome, synthesize_group};

/// Result of converting a timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    /// Pre-existing entries followed by new ones, in group order
    pub frequency_entries: Vec<FrequencyEntry>,
    /// Trips left as scheduled service
    pub scheduled_trips: Vec<TripTimes>,
    /// Groups that were not converted, in group order
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// Number of groups replaced by frequency entries.
    pub fn converted_groups(&self, existing: usize) -> usize {
        self.frequency_entries.len().saturating_sub(existing)
    }
}

/// Convert scheduled trips into frequency entries.
///
/// Trips on routes outside the config's allow-list are passed through
/// first, in input order, followed by the trips of groups that could not
/// be converted. `existing` entries are kept verbatim ahead of the new
/// ones. Fails only if the config is invalid, before any trip is looked at.
pub fn convert(
    existing: &[FrequencyEntry],
    trips: &[TripTimes],
    active: &ServiceActiveSet,
    config: &ConversionConfig,
) -> Result<Conversion, ConfigError> {
    config.validate()?;

    let partition = partition(trips, config);
    let groups: Vec<_> = partition.groups.iter().collect();

    let outcomes: Vec<(Option<Diagnostic>, GroupOutcome)> = groups
        .par_iter()
        .map(|(key, members)| {
            let outcome = synthesize_group(key, members, active, config);
            (outcome.diagnostic(key), outcome)
        })
        .collect();

    let mut conversion = Conversion {
        frequency_entries: existing.to_vec(),
        scheduled_trips: partition.pass_through.into_iter().cloned().collect(),
        diagnostics: Vec::new(),
    };

    for (diagnostic, outcome) in outcomes {
        match outcome {
            GroupOutcome::Converted(entry) => conversion.frequency_entries.push(entry),
            GroupOutcome::Skipped { trips, .. } => conversion.scheduled_trips.extend(trips),
        }
        conversion.diagnostics.extend(diagnostic);
    }

    info!(
        group_by = %config.group_by,
        groups = groups.len(),
        converted = conversion.converted_groups(existing.len()),
        skipped = conversion.diagnostics.len(),
        scheduled_trips = conversion.scheduled_trips.len(),
        "converted timetable to frequencies"
    );

    Ok(conversion)
}
