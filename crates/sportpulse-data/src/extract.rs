//! Flat BI extract for downstream dashboard tools.

use std::fs::File;
use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use sportpulse_core::{Observation, Result, SportPulseError};
use tracing::info;

#[derive(Debug, Serialize)]
struct BiRow {
    ds: String,
    week_start: NaiveDate,
    facility_id: u32,
    hour: u32,
    is_weekend: u8,
    is_rainy: u8,
    nearby_event: u8,
    temp: f64,
    price: f64,
    demand: f64,
    revenue: f64,
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Serialize flat summary rows (facility aggregates, price curves, insight
/// reports) as headered CSV for BI import.
pub fn write_summary_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| SportPulseError::InvalidInput(format!("csv write: {e}")))?;
    }
    writer.flush().map_err(SportPulseError::Io)?;
    info!(path = %path.display(), rows = rows.len(), "Summary CSV written");
    Ok(())
}

/// Write the observation history enriched with the derived columns the BI
/// dashboards group on (Monday week bucket, revenue).
pub fn write_bi_extract(path: &Path, observations: &[Observation]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for obs in observations {
        let row = BiRow {
            ds: obs.ds.format("%Y-%m-%d %H:%M:%S").to_string(),
            week_start: week_start(obs.ds.date()),
            facility_id: obs.facility_id,
            hour: obs.hour,
            is_weekend: obs.is_weekend as u8,
            is_rainy: obs.is_rainy as u8,
            nearby_event: obs.nearby_event as u8,
            temp: obs.temp,
            price: obs.price,
            demand: obs.y,
            revenue: obs.price * obs.y,
        };
        writer
            .serialize(row)
            .map_err(|e| SportPulseError::InvalidInput(format!("csv write: {e}")))?;
    }
    writer.flush().map_err(SportPulseError::Io)?;
    info!(path = %path.display(), records = observations.len(), "BI extract written");
    Ok(())
}
