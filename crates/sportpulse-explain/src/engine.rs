//! Demand shock detection: which factor drives a single prediction.

use serde::Serialize;
use sportpulse_core::{DemandPredictor, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use tracing::debug;

use crate::shapley::{AttributionStrategy, ShapleyAttribution};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increasing,
    Decreasing,
}

/// Per-feature decomposition of one prediction relative to the baseline.
#[derive(Debug, Clone, Serialize)]
pub struct AttributionResult {
    /// Signed contributions in canonical feature order.
    pub contributions: Vec<(String, f64)>,
    pub prediction: f64,
    pub baseline_prediction: f64,
    pub dominant_feature: String,
    pub dominant_impact: f64,
    pub direction: Direction,
}

/// Decomposes predictions through a pluggable attribution strategy.
pub struct AttributionEngine {
    strategy: Box<dyn AttributionStrategy>,
}

impl AttributionEngine {
    pub fn new(strategy: Box<dyn AttributionStrategy>) -> Self {
        Self { strategy }
    }

    /// Explain one prediction of the injected model.
    ///
    /// Reported predictions are on the raw (unclamped) scale the
    /// contributions decompose, so they always sum consistently.
    pub fn explain(
        &self,
        model: &dyn DemandPredictor,
        features: &FeatureVector,
    ) -> AttributionResult {
        let values = self.strategy.contributions(model, features);
        let prediction = model.raw_values(&features.to_values());
        let baseline_prediction = model.raw_values(&model.baseline_values());

        // Largest absolute contribution wins; on a tie the first feature in
        // canonical order is kept (strictly-greater scan).
        let mut dominant = 0;
        for (i, v) in values.iter().enumerate() {
            if v.abs() > values[dominant].abs() {
                dominant = i;
            }
        }

        let dominant_impact = values[dominant];
        debug!(
            feature = FEATURE_NAMES[dominant],
            impact = format!("{:+.3}", dominant_impact),
            "Dominant demand driver"
        );

        AttributionResult {
            contributions: (0..FEATURE_COUNT)
                .map(|i| (FEATURE_NAMES[i].to_string(), values[i]))
                .collect(),
            prediction,
            baseline_prediction,
            dominant_feature: FEATURE_NAMES[dominant].to_string(),
            dominant_impact,
            direction: if dominant_impact > 0.0 {
                Direction::Increasing
            } else {
                Direction::Decreasing
            },
        }
    }
}

impl Default for AttributionEngine {
    fn default() -> Self {
        Self::new(Box::new(ShapleyAttribution))
    }
}

/// Templated message naming the dominant factor, its direction and
/// magnitude. The special-cased suffixes are purely cosmetic.
pub fn explanation_text(result: &AttributionResult) -> String {
    let direction = match result.direction {
        Direction::Increasing => "increasing",
        Direction::Decreasing => "decreasing",
    };
    let mut text = format!(
        "Biggest driver of demand: {}. It is currently {} demand (impact score {:+.2}).",
        result.dominant_feature, direction, result.dominant_impact
    );

    if result.dominant_feature == "is_rainy" && result.dominant_impact < 0.0 {
        text.push_str(" Rain is cutting open-air bookings sharply.");
    } else if result.dominant_feature == "nearby_event" && result.dominant_impact > 0.0 {
        text.push_str(" A nearby match or concert is spiking demand.");
    }

    text
}

#[cfg(test)]
mod tests;
