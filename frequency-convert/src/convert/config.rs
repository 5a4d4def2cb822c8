//! Configuration for a frequency conversion.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{RouteId, ServiceTime};

/// How far before the window start synthesized entries begin (3 hours).
///
/// A trip that leaves its first stop shortly before the window can still
/// reach the window's stops, so the frequency entry has to cover it.
pub const LOOKBACK_SECS: i32 = 3 * 60 * 60;

/// Invalid conversion configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The window is empty or inverted
    #[error("window end {end} must be after window start {start}")]
    EmptyWindow { start: ServiceTime, end: ServiceTime },

    /// Group-by value is not one of the known keys
    #[error("unrecognized group by value: {0:?}")]
    UnknownGroupBy(String),
}

/// How trips are bucketed before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConversionGroup {
    /// One bucket per route
    Route,
    /// One bucket per route and direction
    RouteDirection,
    /// One bucket per stop pattern
    Pattern,
}

impl ConversionGroup {
    /// Canonical name of the group-by key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionGroup::Route => "ROUTE",
            ConversionGroup::RouteDirection => "ROUTE_DIRECTION",
            ConversionGroup::Pattern => "PATTERN",
        }
    }
}

impl FromStr for ConversionGroup {
    type Err = ConfigError;

    /// Parses case-insensitively; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ROUTE" => Ok(ConversionGroup::Route),
            "ROUTE_DIRECTION" => Ok(ConversionGroup::RouteDirection),
            "PATTERN" => Ok(ConversionGroup::Pattern),
            _ => Err(ConfigError::UnknownGroupBy(s.to_string())),
        }
    }
}

impl TryFrom<String> for ConversionGroup {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConversionGroup> for String {
    fn from(value: ConversionGroup) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ConversionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Routes to convert. `None` converts every route.
    #[serde(default, rename = "route_id", skip_serializing_if = "Option::is_none")]
    pub route_ids: Option<BTreeSet<RouteId>>,

    /// Start of the conversion window (exclusive).
    pub window_start: ServiceTime,

    /// End of the conversion window (exclusive).
    pub window_end: ServiceTime,

    /// How to bucket trips.
    pub group_by: ConversionGroup,
}

impl ConversionConfig {
    /// Create a configuration converting every route.
    pub fn new(
        window_start: ServiceTime,
        window_end: ServiceTime,
        group_by: ConversionGroup,
    ) -> Self {
        Self {
            route_ids: None,
            window_start,
            window_end,
            group_by,
        }
    }

    /// Restrict conversion to the given routes.
    pub fn with_route_ids(mut self, route_ids: impl IntoIterator<Item = RouteId>) -> Self {
        self.route_ids = Some(route_ids.into_iter().collect());
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_end <= self.window_start {
            return Err(ConfigError::EmptyWindow {
                start: self.window_start,
                end: self.window_end,
            });
        }
        Ok(())
    }

    /// Should trips on this route be considered for conversion?
    pub fn includes_route(&self, route_id: &RouteId) -> bool {
        self.route_ids
            .as_ref()
            .is_none_or(|ids| ids.contains(route_id))
    }

    /// Is `time` strictly inside the conversion window?
    pub fn in_window(&self, time: ServiceTime) -> bool {
        time.is_strictly_between(self.window_start, self.window_end)
    }

    /// Start time given to synthesized frequency entries.
    ///
    /// Clamped to [`ServiceTime::MIN`] for windows opening near the minimum.
    pub fn frequency_start(&self) -> ServiceTime {
        self.window_start - LOOKBACK_SECS
    }
}
