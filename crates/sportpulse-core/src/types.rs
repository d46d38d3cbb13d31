use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SportPulseError};

/// Number of contextual features consumed by the demand model.
pub const FEATURE_COUNT: usize = 7;

/// Canonical feature order. Significant for attribution display and for
/// tie-breaking when two features have identical absolute contribution.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "hour",
    "is_weekend",
    "temp",
    "is_rainy",
    "nearby_event",
    "distance_to_event",
    "price",
];

/// Sentinel distance used when no event is nearby.
pub const NO_EVENT_DISTANCE: f64 = 50.0;

/// One historical booking record. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub ds: NaiveDateTime,
    pub facility_id: u32,
    pub lat: f64,
    pub lon: f64,
    pub hour: u32,
    pub is_weekend: bool,
    pub temp: f64,
    pub is_rainy: bool,
    pub nearby_event: bool,
    pub distance_to_event: f64,
    pub price: f64,
    /// Observed demand (occupancy), bounded to [0, capacity].
    pub y: f64,
}

impl Observation {
    /// Contextual feature subset used for prediction.
    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            hour: self.hour,
            is_weekend: self.is_weekend,
            temp: self.temp,
            is_rainy: self.is_rainy,
            nearby_event: self.nearby_event,
            distance_to_event: self.distance_to_event,
            price: self.price,
        }
    }
}

/// The fixed set of contextual inputs consumed by the demand model.
///
/// Fields follow the canonical order in [`FEATURE_NAMES`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub hour: u32,
    pub is_weekend: bool,
    pub temp: f64,
    pub is_rainy: bool,
    pub nearby_event: bool,
    pub distance_to_event: f64,
    pub price: f64,
}

impl FeatureVector {
    /// Build a validated feature vector.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hour: u32,
        is_weekend: bool,
        temp: f64,
        is_rainy: bool,
        nearby_event: bool,
        distance_to_event: f64,
        price: f64,
    ) -> Result<Self> {
        if hour > 23 {
            return Err(SportPulseError::InvalidInput(format!(
                "hour must be in 0..=23, got {hour}"
            )));
        }
        if !(distance_to_event >= 0.0) {
            return Err(SportPulseError::InvalidInput(format!(
                "distance_to_event must be non-negative, got {distance_to_event}"
            )));
        }
        if !(price > 0.0) {
            return Err(SportPulseError::InvalidInput(format!(
                "price must be positive, got {price}"
            )));
        }
        Ok(Self {
            hour,
            is_weekend,
            temp,
            is_rainy,
            nearby_event,
            distance_to_event,
            price,
        })
    }

    /// Numeric coding in canonical order (booleans as 0/1).
    pub fn to_values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.hour as f64,
            self.is_weekend as u8 as f64,
            self.temp,
            self.is_rainy as u8 as f64,
            self.nearby_event as u8 as f64,
            self.distance_to_event,
            self.price,
        ]
    }

    /// Copy with a substituted price. Used by the grid scan.
    pub fn with_price(&self, price: f64) -> Self {
        Self {
            price,
            ..self.clone()
        }
    }
}

/// Read-only inference over a trained demand model.
///
/// The artifact behind this trait is immutable after training and may be
/// shared across concurrent inference calls without locking.
pub trait DemandPredictor {
    /// Predict demand from numerically coded features. Clamped to >= 0.
    fn predict_values(&self, values: &[f64; FEATURE_COUNT]) -> f64;

    /// Unclamped model output. Attribution works on this scale so that a
    /// prediction floored at zero still carries its full feature effects.
    fn raw_values(&self, values: &[f64; FEATURE_COUNT]) -> f64 {
        self.predict_values(values)
    }

    /// The training-distribution reference point (per-feature means),
    /// used as the attribution baseline.
    fn baseline_values(&self) -> [f64; FEATURE_COUNT];

    /// Predict demand for a structured feature vector.
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.predict_values(&features.to_values())
    }
}

/// Static mapping from facility id to its maximum servable quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityTable {
    capacities: HashMap<u32, f64>,
    default_capacity: f64,
}

impl CapacityTable {
    pub fn new(capacities: HashMap<u32, f64>, default_capacity: f64) -> Self {
        Self {
            capacities,
            default_capacity,
        }
    }

    /// Capacity for a facility, falling back to the default when unmapped.
    pub fn capacity(&self, facility_id: u32) -> f64 {
        self.capacities
            .get(&facility_id)
            .copied()
            .unwrap_or(self.default_capacity)
    }
}

impl Default for CapacityTable {
    /// The built-in capacity table for the eight known facilities.
    fn default() -> Self {
        let capacities = [
            (1, 90.0),
            (2, 100.0),
            (3, 110.0),
            (4, 95.0),
            (5, 105.0),
            (6, 120.0),
            (7, 85.0),
            (8, 115.0),
        ]
        .into_iter()
        .collect();
        Self::new(capacities, 100.0)
    }
}
