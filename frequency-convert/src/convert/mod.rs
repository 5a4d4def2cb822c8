//! Conversion of scheduled trips into frequency-based service.
//!
//! This module answers: "which groups of near-identical scheduled trips can
//! be replaced by a single template trip running every N minutes?"
//!
//! Trips are partitioned into groups (by route, route and direction, or
//! stop pattern). Each group is filtered to the trips running inside the
//! conversion window, a headway is measured at a stop every pattern in the
//! group serves, and a template trip is built from the mean hop and dwell
//! times of the group's most common pattern. Groups that cannot be
//! converted are left as scheduled trips and reported as [`Diagnostic`]s.

mod config;
mod converter;
mod group;
mod headway;
mod profile;
mod selection;
mod synthesize;

pub use config::{ConfigError, ConversionConfig, ConversionGroup, LOOKBACK_SECS};
pub use converter::{Conversion, convert};
pub use group::{GroupKey, Partition, partition};
pub use headway::{headways, median_headway, sample_arrivals};
pub use profile::{TravelProfile, synthesize_template};
pub use selection::{common_stop, dominant_pattern, pattern_counts};
pub use synthesize::{Diagnostic, GroupOutcome, SkipReason, synthesize_group};
