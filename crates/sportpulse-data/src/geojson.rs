//! GeoJSON export of the facility demand map.

use std::fs::File;
use std::path::Path;

use serde_json::{json, Value};
use sportpulse_core::Result;
use sportpulse_supply::FacilityGeo;
use tracing::info;

/// A `FeatureCollection` of facility points, each annotated with its mean
/// demand. Coordinates follow the GeoJSON `[lon, lat]` order.
pub fn facility_feature_collection(facilities: &[FacilityGeo]) -> Value {
    let features: Vec<Value> = facilities
        .iter()
        .map(|f| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [f.lon, f.lat],
                },
                "properties": {
                    "facility_id": f.facility_id,
                    "avg_demand": f.avg_demand,
                },
            })
        })
        .collect();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write the facility map as a GeoJSON file.
pub fn export_geojson(path: &Path, facilities: &[FacilityGeo]) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &facility_feature_collection(facilities))?;
    info!(path = %path.display(), facilities = facilities.len(), "GeoJSON exported");
    Ok(())
}
