//! Domain error types.
//!
//! These errors represent validation failures when building timetable
//! objects. They are distinct from scenario I/O errors and from the
//! per-group conditions reported by the converter.

use super::{InvalidId, ServiceTime, TimeError};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Number of stop times does not match the pattern
    #[error("trip {trip_id} has {times} stop times but its pattern has {stops} stops")]
    StopCountMismatch {
        trip_id: String,
        times: usize,
        stops: usize,
    },

    /// A trip must visit at least one stop
    #[error("trip {0} has an empty stop pattern")]
    EmptyPattern(String),

    /// Headway must be positive
    #[error("invalid headway {0}s: must be positive")]
    InvalidHeadway(i32),

    /// Frequency window is empty or inverted
    #[error("invalid frequency window: end {end} is not after start {start}")]
    InvalidWindow { start: ServiceTime, end: ServiceTime },

    /// Service code too large for the active set
    #[error("service code {0} exceeds the maximum of {max}", max = super::MAX_SERVICE_CODE)]
    ServiceCodeOutOfRange(u32),

    /// Identifier failed validation
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    /// Time failed validation
    #[error(transparent)]
    InvalidTime(#[from] TimeError),
}
