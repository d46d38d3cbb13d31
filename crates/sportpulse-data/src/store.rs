//! CSV persistence for observation histories.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sportpulse_core::{Observation, Result, SportPulseError};
use tracing::info;

const DS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Flat row layout. Booleans are stored as 0/1 so the files stay friendly to
/// spreadsheet and BI imports.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    ds: String,
    facility_id: u32,
    lat: f64,
    lon: f64,
    hour: u32,
    is_weekend: u8,
    temp: f64,
    is_rainy: u8,
    nearby_event: u8,
    distance_to_event: f64,
    price: f64,
    y: f64,
}

impl From<&Observation> for CsvRow {
    fn from(obs: &Observation) -> Self {
        Self {
            ds: obs.ds.format(DS_FORMAT).to_string(),
            facility_id: obs.facility_id,
            lat: obs.lat,
            lon: obs.lon,
            hour: obs.hour,
            is_weekend: obs.is_weekend as u8,
            temp: obs.temp,
            is_rainy: obs.is_rainy as u8,
            nearby_event: obs.nearby_event as u8,
            distance_to_event: obs.distance_to_event,
            price: obs.price,
            y: obs.y,
        }
    }
}

impl CsvRow {
    fn into_observation(self) -> Result<Observation> {
        let ds = NaiveDateTime::parse_from_str(&self.ds, DS_FORMAT).map_err(|e| {
            SportPulseError::InvalidInput(format!("bad timestamp {:?}: {e}", self.ds))
        })?;
        Ok(Observation {
            ds,
            facility_id: self.facility_id,
            lat: self.lat,
            lon: self.lon,
            hour: self.hour,
            is_weekend: self.is_weekend != 0,
            temp: self.temp,
            is_rainy: self.is_rainy != 0,
            nearby_event: self.nearby_event != 0,
            distance_to_event: self.distance_to_event,
            price: self.price,
            y: self.y,
        })
    }
}

/// Write observations as headered CSV.
pub fn write_csv(path: &Path, observations: &[Observation]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for obs in observations {
        writer
            .serialize(CsvRow::from(obs))
            .map_err(|e| SportPulseError::InvalidInput(format!("csv write: {e}")))?;
    }
    writer
        .flush()
        .map_err(SportPulseError::Io)?;
    info!(path = %path.display(), records = observations.len(), "Observations written");
    Ok(())
}

/// Read a headered CSV of observations.
///
/// A missing file maps to [`SportPulseError::DataSourceNotFound`]; malformed
/// rows map to [`SportPulseError::InvalidInput`].
pub fn read_csv(path: &Path) -> Result<Vec<Observation>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SportPulseError::DataSourceNotFound(path.display().to_string())
        } else {
            SportPulseError::Io(e)
        }
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let mut observations = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row.map_err(|e| SportPulseError::InvalidInput(format!("csv read: {e}")))?;
        observations.push(row.into_observation()?);
    }
    info!(path = %path.display(), records = observations.len(), "Observations loaded");
    Ok(observations)
}
