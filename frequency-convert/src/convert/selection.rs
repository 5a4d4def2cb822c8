//! Dominant pattern selection and common stop discovery.
//!
//! A group can mix several stop patterns (short turns, branches). The
//! template is built from the most used pattern, while headways are
//! measured at a stop every pattern in the group serves.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::domain::{StopId, StopPattern, TripTimes};

/// Number of trips following each pattern, in order of first appearance.
pub fn pattern_counts<'a>(trips: &[&'a TripTimes]) -> IndexMap<&'a Arc<StopPattern>, usize> {
    let mut counts: IndexMap<&Arc<StopPattern>, usize> = IndexMap::new();
    for &trip in trips {
        *counts.entry(trip.pattern()).or_default() += 1;
    }
    counts
}

/// Pattern followed by the most trips.
///
/// Patterns are scanned in first-appearance order and a pattern only
/// replaces the current best when its count is strictly greater, so a tie
/// goes to the pattern seen first.
pub fn dominant_pattern<'a>(
    counts: &IndexMap<&'a Arc<StopPattern>, usize>,
) -> Option<&'a Arc<StopPattern>> {
    let mut best: Option<(&Arc<StopPattern>, usize)> = None;
    for (&pattern, &count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((pattern, count));
        }
    }
    best.map(|(pattern, _)| pattern)
}

/// A stop served by every given pattern.
///
/// When several stops qualify the lowest `StopId` is returned. Returns
/// `None` if the patterns share no stop or no pattern is given.
pub fn common_stop<'a, I>(patterns: I) -> Option<StopId>
where
    I: IntoIterator<Item = &'a StopPattern>,
{
    let mut patterns = patterns.into_iter();
    let mut shared: HashSet<&StopId> = patterns.next()?.stop_set();

    for pattern in patterns {
        shared.retain(|stop| pattern.contains(stop));
        if shared.is_empty() {
            return None;
        }
    }

    shared.into_iter().min().cloned()
}
