//! Loading scenarios into domain types and writing results.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::convert::{ConversionConfig, convert};
use crate::domain::{
    DomainError, FrequencyEntry, ServiceActiveSet, StopId, StopPattern, StopTime, Trip, TripTimes,
};

use super::error::ScenarioError;
use super::types::{Scenario, ScenarioOutput, TripDto};

/// Shares one `Arc<StopPattern>` between all trips with the same stops.
#[derive(Debug, Default)]
pub struct PatternInterner {
    patterns: HashSet<Arc<StopPattern>>,
}

impl PatternInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared pattern for this stop list.
    pub fn intern(&mut self, stops: Vec<StopId>) -> Arc<StopPattern> {
        let pattern = StopPattern::new(stops);
        if let Some(existing) = self.patterns.get(&pattern) {
            return Arc::clone(existing);
        }
        let pattern = Arc::new(pattern);
        self.patterns.insert(Arc::clone(&pattern));
        pattern
    }

    /// Number of distinct patterns seen.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// A scenario converted into validated domain types.
#[derive(Debug, Clone)]
pub struct LoadedScenario {
    pub active_services: ServiceActiveSet,
    pub trips: Vec<TripTimes>,
    pub frequencies: Vec<FrequencyEntry>,
    pub config: ConversionConfig,
}

impl LoadedScenario {
    /// Run the conversion and build the output document.
    pub fn convert(&self) -> Result<ScenarioOutput, ScenarioError> {
        let conversion = convert(
            &self.frequencies,
            &self.trips,
            &self.active_services,
            &self.config,
        )?;
        Ok(ScenarioOutput::new(self.active_services.clone(), &conversion))
    }
}

impl Scenario {
    /// Read and parse a scenario file.
    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Validate the scenario and convert it into domain types.
    pub fn load(self) -> Result<LoadedScenario, ScenarioError> {
        let config = self.modification.config().clone();
        config.validate()?;

        let mut interner = PatternInterner::new();

        let trips = self
            .trips
            .into_iter()
            .map(|dto| {
                let trip_id = dto.trip_id.clone();
                trip_times(dto, &mut interner)
                    .map_err(|source| ScenarioError::Trip { trip_id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let frequencies = self
            .frequencies
            .into_iter()
            .enumerate()
            .map(|(index, dto)| {
                let trip_id = dto.trip.trip_id.clone();
                trip_times(dto.trip, &mut interner)
                    .and_then(|trip| {
                        FrequencyEntry::new(
                            dto.start_time,
                            dto.end_time,
                            dto.headway_secs,
                            dto.exact_times,
                            trip,
                        )
                    })
                    .map_err(|source| ScenarioError::Frequency {
                        index,
                        trip_id,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            trips = trips.len(),
            frequencies = frequencies.len(),
            patterns = interner.len(),
            active_services = self.active_services.len(),
            "loaded scenario"
        );

        Ok(LoadedScenario {
            active_services: self.active_services,
            trips,
            frequencies,
            config,
        })
    }
}

fn trip_times(dto: TripDto, interner: &mut PatternInterner) -> Result<TripTimes, DomainError> {
    let pattern = interner.intern(dto.stops);
    let times = dto
        .times
        .into_iter()
        .map(|(arrival, departure)| StopTime::new(arrival, departure))
        .collect();
    TripTimes::new(
        Trip::new(dto.trip_id, dto.route_id, dto.direction_id, dto.service_code),
        pattern,
        times,
    )
}

/// Write the output as pretty JSON to `path`, or to stdout if `None`.
pub fn write_output(output: &ScenarioOutput, path: Option<&Path>) -> Result<(), ScenarioError> {
    match path {
        Some(path) => {
            let write_err = |source| ScenarioError::Write {
                path: path.to_path_buf(),
                source,
            };
            let file = File::create(path).map_err(write_err)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, output)?;
            writer.write_all(b"\n").map_err(write_err)?;
            writer.flush().map_err(write_err)
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, output)?;
            writeln!(stdout).map_err(|source| ScenarioError::Write {
                path: "<stdout>".into(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConversionGroup;
    use crate::domain::{ServiceTime, StopIndex};
    use crate::scenario::{FrequencyDto, Modification};
    use tempfile::tempdir;

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn trip_dto(id: &str, stops: &[&str], start: i32) -> TripDto {
        TripDto {
            trip_id: id.to_string(),
            route_id: crate::domain::RouteId::parse("R1").unwrap(),
            direction_id: Some(0),
            service_code: 0,
            stops: stops.iter().map(|s| stop(s)).collect(),
            times: (0..stops.len() as i32)
                .map(|i| {
                    let t = ServiceTime::from_seconds(start + 600 * i);
                    (t, t)
                })
                .collect(),
        }
    }

    fn scenario(trips: Vec<TripDto>) -> Scenario {
        Scenario {
            active_services: ServiceActiveSet::from_codes([0]).unwrap(),
            trips,
            frequencies: vec![],
            modification: Modification::ConvertToFrequency(ConversionConfig::new(
                ServiceTime::from_hms(7, 0, 0),
                ServiceTime::from_hms(10, 0, 0),
                ConversionGroup::Route,
            )),
        }
    }

    // PatternInterner

    #[test]
    fn interner_shares_equal_patterns() {
        let mut interner = PatternInterner::new();
        let a = interner.intern(vec![stop("A"), stop("B")]);
        let b = interner.intern(vec![stop("A"), stop("B")]);
        let c = interner.intern(vec![stop("B"), stop("A")]);

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(interner.len(), 2);
    }

    // Scenario::load

    #[test]
    fn load_interns_trip_patterns() {
        let loaded = scenario(vec![
            trip_dto("T1", &["A", "B"], 28_800),
            trip_dto("T2", &["A", "B"], 29_700),
        ])
        .load()
        .unwrap();

        assert_eq!(loaded.trips.len(), 2);
        assert!(Arc::ptr_eq(loaded.trips[0].pattern(), loaded.trips[1].pattern()));
        assert_eq!(
            loaded.trips[1].arrival_time(StopIndex(1)),
            Some(ServiceTime::from_seconds(30_300))
        );
    }

    #[test]
    fn load_rejects_mismatched_times() {
        let mut bad = trip_dto("T1", &["A", "B"], 28_800);
        bad.times.pop();

        let err = scenario(vec![bad]).load().unwrap_err();

        assert!(matches!(
            err,
            ScenarioError::Trip {
                ref trip_id,
                source: DomainError::StopCountMismatch { times: 1, stops: 2, .. },
            } if trip_id == "T1"
        ));
    }

    #[test]
    fn load_rejects_invalid_frequency() {
        let mut s = scenario(vec![]);
        s.frequencies.push(FrequencyDto {
            start_time: ServiceTime::from_hms(6, 0, 0),
            end_time: ServiceTime::from_hms(9, 0, 0),
            headway_secs: 0,
            exact_times: false,
            trip: trip_dto("F1", &["A", "B"], 0),
        });

        let err = s.load().unwrap_err();

        assert!(matches!(
            err,
            ScenarioError::Frequency {
                index: 0,
                source: DomainError::InvalidHeadway(0),
                ..
            }
        ));
    }

    #[test]
    fn load_rejects_empty_window() {
        let mut s = scenario(vec![]);
        s.modification.config_mut().window_end = ServiceTime::from_hms(6, 0, 0);

        assert!(matches!(s.load(), Err(ScenarioError::Config(_))));
    }

    // Files

    #[test]
    fn read_scenario_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        let original = scenario(vec![trip_dto("T1", &["A", "B"], 28_800)]);
        std::fs::write(&path, serde_json::to_string(&original).unwrap()).unwrap();

        let loaded = Scenario::from_path(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn missing_file_names_path() {
        let err = Scenario::from_path(Path::new("/nonexistent/scenario.json")).unwrap_err();

        assert!(matches!(err, ScenarioError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/scenario.json"));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        std::fs::write(&path, "{\"trips\": [").unwrap();

        assert!(matches!(Scenario::from_path(&path), Err(ScenarioError::Json(_))));
    }

    #[test]
    fn write_output_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let output = scenario(vec![trip_dto("T1", &["A", "B"], 28_800)])
            .load()
            .unwrap()
            .convert()
            .unwrap();

        write_output(&output, Some(&path)).unwrap();

        let written: ScenarioOutput =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, output);
        assert_eq!(written.trips.len(), 1);
        assert_eq!(written.diagnostics[0].reason, "single_trip");
    }

    // LoadedScenario::convert

    #[test]
    fn convert_builds_output() {
        let output = scenario(vec![
            trip_dto("T1", &["A", "B", "C"], 28_800),
            trip_dto("T2", &["A", "B", "C"], 29_700),
            trip_dto("T3", &["A", "B", "C"], 30_600),
            trip_dto("LATE", &["A", "B", "C"], 40_000),
        ])
        .load()
        .unwrap()
        .convert()
        .unwrap();

        assert!(output.trips.is_empty());
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.frequencies.len(), 1);

        let frequency = &output.frequencies[0];
        assert_eq!(frequency.headway_secs, 900);
        assert_eq!(frequency.start_time, ServiceTime::from_hms(4, 0, 0));
        assert_eq!(frequency.trip.trip_id, "T1");
        assert_eq!(
            frequency.trip.times,
            vec![
                (ServiceTime::from_seconds(0), ServiceTime::from_seconds(0)),
                (ServiceTime::from_seconds(600), ServiceTime::from_seconds(600)),
                (ServiceTime::from_seconds(1200), ServiceTime::from_seconds(1200)),
            ]
        );
    }
}
