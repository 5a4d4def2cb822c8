//! Headway statistics.
//!
//! Headways are measured from arrivals at a stop shared by every pattern in
//! a group. The median is used rather than the mean so that reliever runs
//! (a second vehicle a minute behind the first, common on routes serving
//! schools) do not drag the headway down.

use crate::domain::{ServiceTime, StopId, TripTimes};

use super::config::ConversionConfig;

/// Sorted arrival times at `stop` across `trips`.
///
/// Arrivals strictly inside the window are used. When fewer than two of
/// them are, every arrival is added to those, so an in-window arrival can
/// appear twice. A trip can start inside the window yet reach the common
/// stop after it closes when its pattern is much longer than the others.
pub fn sample_arrivals(
    trips: &[&TripTimes],
    stop: &StopId,
    config: &ConversionConfig,
) -> Vec<ServiceTime> {
    let arrivals: Vec<ServiceTime> = trips
        .iter()
        .filter_map(|trip| {
            let idx = trip.pattern().index_of(stop)?;
            trip.arrival_time(idx)
        })
        .collect();

    let in_window: Vec<ServiceTime> = arrivals
        .iter()
        .copied()
        .filter(|t| config.in_window(*t))
        .collect();

    let mut sample = in_window;
    if sample.len() < 2 {
        sample.extend(arrivals);
    }
    sample.sort_unstable();
    sample
}

/// Sorted gaps between consecutive sorted arrivals, in seconds.
///
/// Gaps wider than `i32::MAX` saturate.
pub fn headways(sorted_arrivals: &[ServiceTime]) -> Vec<i32> {
    let mut gaps: Vec<i32> = sorted_arrivals
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .collect();
    gaps.sort_unstable();
    gaps
}

/// Median of sorted headways.
///
/// For an even count the two values at `(n - 1) / 2` and `(n - 1) / 2 + 1`
/// are averaged with integer division. Returns `None` when there are no
/// headways.
///
/// # Examples
///
/// ```
/// use frequency_convert::convert::median_headway;
///
/// assert_eq!(median_headway(&[500]), Some(500));
/// assert_eq!(median_headway(&[100, 200, 300]), Some(200));
/// assert_eq!(median_headway(&[100, 200, 300, 400]), Some(250));
/// assert_eq!(median_headway(&[]), None);
/// ```
pub fn median_headway(sorted: &[i32]) -> Option<i32> {
    let n = sorted.len();
    match n {
        0 => None,
        1 => Some(sorted[0]),
        _ if n % 2 == 0 => {
            let mid = (n - 1) / 2;
            // The mean of two i32 values always fits in i32
            Some(((i64::from(sorted[mid]) + i64::from(sorted[mid + 1])) / 2) as i32)
        }
        _ => Some(sorted[(n - 1) / 2]),
    }
}
