//! Descriptive rollups for dashboards and the map layer.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use sportpulse_core::Observation;

/// Booking profile of one facility over the analysed window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityInsight {
    pub facility_id: u32,
    pub avg_demand: f64,
    pub avg_price: f64,
    pub avg_event_distance: f64,
    pub observations: usize,
}

/// Facility location annotated with its mean demand, for map rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityGeo {
    pub facility_id: u32,
    pub lat: f64,
    pub lon: f64,
    pub avg_demand: f64,
}

/// Mean demand and price for one ISO week of the year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrend {
    pub week_of_year: u32,
    pub avg_demand: f64,
    pub avg_price: f64,
}

/// Per-facility booking profiles, highest mean demand first.
pub fn facility_insights(observations: &[Observation]) -> Vec<FacilityInsight> {
    let mut buckets: BTreeMap<u32, (f64, f64, f64, usize)> = BTreeMap::new();
    for obs in observations {
        let entry = buckets.entry(obs.facility_id).or_insert((0.0, 0.0, 0.0, 0));
        entry.0 += obs.y;
        entry.1 += obs.price;
        entry.2 += obs.distance_to_event;
        entry.3 += 1;
    }
    let mut insights: Vec<FacilityInsight> = buckets
        .into_iter()
        .map(|(facility_id, (demand, price, distance, count))| {
            let n = count as f64;
            FacilityInsight {
                facility_id,
                avg_demand: demand / n,
                avg_price: price / n,
                avg_event_distance: distance / n,
                observations: count,
            }
        })
        .collect();
    insights.sort_by(|a, b| {
        b.avg_demand
            .partial_cmp(&a.avg_demand)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.facility_id.cmp(&b.facility_id))
    });
    insights
}

/// Facility coordinates paired with mean demand. Coordinates come from the
/// first record seen for each facility.
pub fn facility_geo(observations: &[Observation]) -> Vec<FacilityGeo> {
    let mut buckets: BTreeMap<u32, (f64, f64, f64, usize)> = BTreeMap::new();
    for obs in observations {
        let entry = buckets
            .entry(obs.facility_id)
            .or_insert((obs.lat, obs.lon, 0.0, 0));
        entry.2 += obs.y;
        entry.3 += 1;
    }
    buckets
        .into_iter()
        .map(|(facility_id, (lat, lon, demand, count))| FacilityGeo {
            facility_id,
            lat,
            lon,
            avg_demand: demand / count as f64,
        })
        .collect()
}

/// Mean demand and price per ISO week of the year, ascending by week.
pub fn weekly_trend(observations: &[Observation]) -> Vec<WeeklyTrend> {
    let mut buckets: BTreeMap<u32, (f64, f64, usize)> = BTreeMap::new();
    for obs in observations {
        let week = obs.ds.date().iso_week().week();
        let entry = buckets.entry(week).or_insert((0.0, 0.0, 0));
        entry.0 += obs.y;
        entry.1 += obs.price;
        entry.2 += 1;
    }
    buckets
        .into_iter()
        .map(|(week_of_year, (demand, price, count))| {
            let n = count as f64;
            WeeklyTrend {
                week_of_year,
                avg_demand: demand / n,
                avg_price: price / n,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;
