//! Supply/demand balance per facility.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sportpulse_core::{CapacityTable, Observation};
use tracing::info;

/// Per-facility averages over the analysed window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilitySummary {
    pub facility_id: u32,
    pub avg_capacity: f64,
    pub avg_demand: f64,
    /// Mean of per-record `demand / capacity`, clamped to `[0, 1]`.
    pub avg_utilization: f64,
    /// Mean spare capacity, `max(0, capacity - demand)` per record.
    pub avg_capacity_gap: f64,
}

/// Record-level means across the whole network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSummary {
    pub facilities: usize,
    pub avg_capacity: f64,
    pub avg_demand: f64,
    pub avg_utilization: f64,
    pub avg_capacity_gap: f64,
}

/// Facility summaries sorted by utilization, busiest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationReport {
    pub facilities: Vec<FacilitySummary>,
    pub overall: OverallSummary,
}

#[derive(Default)]
struct Accumulator {
    capacity: f64,
    demand: f64,
    utilization: f64,
    gap: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, capacity: f64, demand: f64) {
        let utilization = if capacity > 0.0 {
            (demand / capacity).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.capacity += capacity;
        self.demand += demand;
        self.utilization += utilization;
        self.gap += (capacity - demand).max(0.0);
        self.count += 1;
    }
}

/// Aggregate observed demand against the capacity table.
///
/// Utilization is clamped per record, so over-capacity demand reads as a
/// fully booked facility with zero spare capacity.
pub fn summarize(observations: &[Observation], capacities: &CapacityTable) -> UtilizationReport {
    let mut buckets: BTreeMap<u32, Accumulator> = BTreeMap::new();
    let mut total = Accumulator::default();
    for obs in observations {
        let capacity = capacities.capacity(obs.facility_id);
        buckets
            .entry(obs.facility_id)
            .or_default()
            .push(capacity, obs.y);
        total.push(capacity, obs.y);
    }

    let mut facilities: Vec<FacilitySummary> = buckets
        .into_iter()
        .map(|(facility_id, acc)| {
            let n = acc.count as f64;
            FacilitySummary {
                facility_id,
                avg_capacity: acc.capacity / n,
                avg_demand: acc.demand / n,
                avg_utilization: acc.utilization / n,
                avg_capacity_gap: acc.gap / n,
            }
        })
        .collect();
    facilities.sort_by(|a, b| {
        b.avg_utilization
            .partial_cmp(&a.avg_utilization)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.facility_id.cmp(&b.facility_id))
    });

    let n = total.count.max(1) as f64;
    let overall = OverallSummary {
        facilities: facilities.len(),
        avg_capacity: total.capacity / n,
        avg_demand: total.demand / n,
        avg_utilization: total.utilization / n,
        avg_capacity_gap: total.gap / n,
    };

    info!(
        facilities = overall.facilities,
        avg_utilization = overall.avg_utilization,
        "Supply/demand summary built"
    );

    UtilizationReport {
        facilities,
        overall,
    }
}

/// Utilization expressed as a percentage for display, clamped to `[0, 100]`.
pub fn occupancy_percent(demand: f64, capacity: f64) -> f64 {
    if capacity <= 0.0 {
        return 0.0;
    }
    (demand / capacity * 100.0).clamp(0.0, 100.0)
}
