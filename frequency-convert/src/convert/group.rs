//! Partitioning of scheduled trips into conversion groups.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::domain::{RouteId, StopPattern, TripTimes};

use super::config::{ConversionConfig, ConversionGroup};

/// Key of a conversion group.
///
/// `Pattern` keys compare structurally, so every trip following the same
/// ordered stop list lands in the same group whether or not the trips share
/// one `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Route(RouteId),
    RouteDirection(RouteId, Option<u8>),
    Pattern(Arc<StopPattern>),
}

impl GroupKey {
    /// Key of the group a trip belongs to.
    pub fn for_trip(trip: &TripTimes, group_by: ConversionGroup) -> Self {
        match group_by {
            ConversionGroup::Route => GroupKey::Route(trip.route_id().clone()),
            ConversionGroup::RouteDirection => {
                GroupKey::RouteDirection(trip.route_id().clone(), trip.direction_id())
            }
            ConversionGroup::Pattern => GroupKey::Pattern(Arc::clone(trip.pattern())),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Route(route) => write!(f, "{route}"),
            GroupKey::RouteDirection(route, Some(direction)) => write!(f, "{route}_{direction}"),
            GroupKey::RouteDirection(route, None) => write!(f, "{route}_"),
            GroupKey::Pattern(pattern) => write!(f, "{pattern}"),
        }
    }
}

/// Scheduled trips split into those left alone and those to convert.
#[derive(Debug)]
pub struct Partition<'a> {
    /// Trips on routes outside the allow-list, in input order.
    pub pass_through: Vec<&'a TripTimes>,
    /// Candidate trips by group, groups in order of first appearance.
    pub groups: IndexMap<GroupKey, Vec<&'a TripTimes>>,
}

/// Split trips into pass-through trips and conversion groups.
pub fn partition<'a>(trips: &'a [TripTimes], config: &ConversionConfig) -> Partition<'a> {
    let mut pass_through = Vec::new();
    let mut groups: IndexMap<GroupKey, Vec<&TripTimes>> = IndexMap::new();

    for trip in trips {
        if config.includes_route(trip.route_id()) {
            groups
                .entry(GroupKey::for_trip(trip, config.group_by))
                .or_default()
                .push(trip);
        } else {
            pass_through.push(trip);
        }
    }

    Partition {
        pass_through,
        groups,
    }
}
