//! Scenario error types.

use std::path::PathBuf;

use crate::convert::ConfigError;
use crate::domain::DomainError;

/// Errors from reading, validating or writing a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Scenario file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or a field failed validation
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A scheduled trip is inconsistent
    #[error("invalid trip {trip_id}: {source}")]
    Trip {
        trip_id: String,
        #[source]
        source: DomainError,
    },

    /// A pre-existing frequency entry is inconsistent
    #[error("invalid frequency entry {index} (trip {trip_id}): {source}")]
    Frequency {
        index: usize,
        trip_id: String,
        #[source]
        source: DomainError,
    },

    /// Invalid conversion parameters
    #[error("invalid modification: {0}")]
    Config(#[from] ConfigError),
}
