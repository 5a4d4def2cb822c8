//! JSON scenario files.
//!
//! A scenario holds a timetable (scheduled trips, existing frequency
//! entries, active service codes) and a `convert-to-frequency`
//! modification. The output mirrors the input timetable with the
//! conversion applied, plus the diagnostics of unconverted groups.

mod error;
mod load;
mod types;

pub use error::ScenarioError;
pub use load::{LoadedScenario, PatternInterner, write_output};
pub use types::{DiagnosticDto, FrequencyDto, Modification, Scenario, ScenarioOutput, TripDto};
