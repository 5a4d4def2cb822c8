//! Domain types for scheduled and frequency-based transit service.
//!
//! This module contains the timetable model the converter works on. All
//! types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod error;
mod frequency;
mod pattern;
mod service;
mod stop;
mod time;
mod trip;

pub use error::DomainError;
pub use frequency::FrequencyEntry;
pub use pattern::{StopIndex, StopPattern};
pub use service::{MAX_SERVICE_CODE, ServiceActiveSet};
pub use stop::{InvalidId, RouteId, StopId};
pub use time::{ServiceTime, TimeError};
pub use trip::{StopTime, Trip, TripTimes};
