//! Stop patterns.
//!
//! A `StopPattern` is the ordered list of stops a trip visits. Trips that
//! visit the same stops in the same order share a pattern. Identity is
//! structural: two patterns built from equal stop lists compare equal, hash
//! equally and sort together.

use std::collections::HashSet;
use std::fmt;

use super::StopId;

/// Position of a stop within a pattern.
///
/// Used instead of `StopId` to disambiguate patterns that visit the same
/// stop more than once (loops).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl StopIndex {
    /// Returns the next index.
    pub fn next(self) -> Self {
        StopIndex(self.0 + 1)
    }
}

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, immutable sequence of stops.
///
/// # Examples
///
/// ```
/// use frequency_convert::domain::{StopId, StopIndex, StopPattern};
///
/// let stop = |s: &str| StopId::parse(s).unwrap();
/// let pattern = StopPattern::new(vec![stop("A"), stop("B"), stop("C")]);
///
/// assert_eq!(pattern.len(), 3);
/// assert_eq!(pattern.stop(StopIndex(1)), Some(&stop("B")));
/// assert_eq!(pattern.index_of(&stop("C")), Some(StopIndex(2)));
/// assert_eq!(pattern.to_string(), "A-B-C");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopPattern {
    stops: Vec<StopId>,
}

impl StopPattern {
    /// Create a pattern from an ordered stop list.
    pub fn new(stops: Vec<StopId>) -> Self {
        Self { stops }
    }

    /// Returns the stops in visiting order.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Returns the stop at the given position.
    pub fn stop(&self, idx: StopIndex) -> Option<&StopId> {
        self.stops.get(idx.0)
    }

    /// Returns the position of the first visit to `stop`.
    pub fn index_of(&self, stop: &StopId) -> Option<StopIndex> {
        self.stops.iter().position(|s| s == stop).map(StopIndex)
    }

    /// Does this pattern visit the given stop?
    pub fn contains(&self, stop: &StopId) -> bool {
        self.stops.contains(stop)
    }

    /// Returns the set of distinct stops visited.
    pub fn stop_set(&self) -> HashSet<&StopId> {
        self.stops.iter().collect()
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if the pattern has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl fmt::Display for StopPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            f.write_str(stop.as_str())?;
        }
        Ok(())
    }
}
