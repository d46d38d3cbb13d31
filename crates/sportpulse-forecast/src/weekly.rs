//! Weekly resampling of raw observations.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sportpulse_core::Observation;

/// Mean demand for one calendar week, anchored to Monday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPoint {
    pub week_start: NaiveDate,
    pub mean_demand: f64,
}

/// Ascending weekly series. Missing weeks stay missing; nothing is imputed.
pub type WeeklySeries = Vec<WeeklyPoint>;

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Resample (possibly sub-daily) observations into weekly demand means,
/// sorted ascending by week start.
pub fn aggregate_weekly(observations: &[Observation]) -> WeeklySeries {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for obs in observations {
        let entry = buckets.entry(week_start(obs.ds.date())).or_insert((0.0, 0));
        entry.0 += obs.y;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(week_start, (sum, count))| WeeklyPoint {
            week_start,
            mean_demand: sum / count as f64,
        })
        .collect()
}
