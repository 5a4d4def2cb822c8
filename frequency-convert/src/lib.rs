//! Scheduled-to-frequency timetable conversion.
//!
//! Replaces groups of near-identical scheduled transit trips with a single
//! template trip and a headway, as a GTFS `frequencies.txt` entry would
//! describe them.

pub mod convert;
pub mod domain;
pub mod scenario;
