use super::*;
use chrono::NaiveDate;
use sportpulse_core::{ModelConfig, Observation, NO_EVENT_DISTANCE};
use sportpulse_model::DemandModel;

struct StubModel {
    contributions_target: [f64; FEATURE_COUNT],
}

impl DemandPredictor for StubModel {
    fn predict_values(&self, values: &[f64; FEATURE_COUNT]) -> f64 {
        // Additive: each feature adds its target contribution when it
        // deviates from the all-zero baseline.
        50.0 + self
            .contributions_target
            .iter()
            .zip(values.iter())
            .map(|(c, v)| if *v != 0.0 { *c } else { 0.0 })
            .sum::<f64>()
    }

    fn baseline_values(&self) -> [f64; FEATURE_COUNT] {
        [0.0; FEATURE_COUNT]
    }
}

/// Noise-free dataset: demand = 20 + 30*prime_time - 40*rain, 25% rainy.
/// Targets keep the raw linear pattern (rainy off-peak rows go negative) so
/// the full rain effect is observable through the model.
fn prime_rain_dataset() -> Vec<Observation> {
    let mut observations = Vec::new();
    let base = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut i = 0i64;
    for hour in 0..24u32 {
        for rep in 0..8 {
            let is_rainy = rep < 2;
            let prime = (18..=22).contains(&hour);
            let y: f64 = 20.0 + if prime { 30.0 } else { 0.0 } - if is_rainy { 40.0 } else { 0.0 };
            observations.push(Observation {
                ds: base + chrono::Duration::hours(i),
                facility_id: 1,
                lat: 39.93,
                lon: 32.85,
                hour,
                is_weekend: false,
                temp: 20.0,
                is_rainy,
                nearby_event: false,
                distance_to_event: NO_EVENT_DISTANCE,
                price: 100.0,
                y,
            });
            i += 1;
        }
    }
    observations
}

#[test]
fn test_rain_dominates_rainy_off_peak_prediction() {
    let observations = prime_rain_dataset();
    let (model, _) = DemandModel::train(&observations, &ModelConfig::default()).unwrap();

    let engine = AttributionEngine::default();
    let features =
        FeatureVector::new(10, false, 20.0, true, false, NO_EVENT_DISTANCE, 100.0).unwrap();
    let result = engine.explain(&model, &features);

    assert_eq!(result.dominant_feature, "is_rainy");
    assert_eq!(result.direction, Direction::Decreasing);
    assert!(
        (result.dominant_impact + 40.0).abs() < 3.0,
        "expected rain contribution near -40, got {}",
        result.dominant_impact
    );
}

#[test]
fn test_attribution_unaffected_by_zero_clamp() {
    // Rainy off-peak demand is 20 - 40 = -20 on the raw scale, so the
    // clamped prediction bottoms out at zero. The attribution must still
    // account for the full rain effect, not just the clamped shortfall.
    let observations = prime_rain_dataset();
    let (model, _) = DemandModel::train(&observations, &ModelConfig::default()).unwrap();

    let engine = AttributionEngine::default();
    let features =
        FeatureVector::new(10, false, 20.0, true, false, NO_EVENT_DISTANCE, 100.0).unwrap();

    assert!(model.predict(&features) < 1.0);

    let result = engine.explain(&model, &features);
    assert!(
        (result.prediction + 20.0).abs() < 2.0,
        "raw prediction {}",
        result.prediction
    );
    assert!((result.baseline_prediction - 20.0).abs() < 3.0);
    assert!(
        (result.dominant_impact + 40.0).abs() < 3.0,
        "rain contribution {}",
        result.dominant_impact
    );
}

#[test]
fn test_contributions_sum_to_prediction_delta() {
    let observations = prime_rain_dataset();
    let (model, _) = DemandModel::train(&observations, &ModelConfig::default()).unwrap();

    let engine = AttributionEngine::default();
    let features =
        FeatureVector::new(19, false, 20.0, true, false, NO_EVENT_DISTANCE, 100.0).unwrap();
    let result = engine.explain(&model, &features);

    let total: f64 = result.contributions.iter().map(|(_, v)| v).sum();
    let delta = result.prediction - result.baseline_prediction;
    let tolerance = 1e-3 * delta.abs().max(1.0);
    assert!(
        (total - delta).abs() < tolerance,
        "sum {total} vs delta {delta}"
    );
}

#[test]
fn test_tie_break_prefers_canonical_order() {
    // is_weekend (index 1) and is_rainy (index 3) contribute identically
    let model = StubModel {
        contributions_target: [0.0, 12.0, 0.0, 12.0, 0.0, 0.0, 0.0],
    };
    let engine = AttributionEngine::default();
    // hour, temp and distance sit at the zero baseline; price is nonzero
    // but carries no weight in the stub.
    let features = FeatureVector::new(0, true, 0.0, true, false, 0.0, 1.0).unwrap();
    let result = engine.explain(&model, &features);
    assert_eq!(result.dominant_feature, "is_weekend");
}

#[test]
fn test_explanation_text_rain_special_case() {
    let result = AttributionResult {
        contributions: vec![("is_rainy".into(), -35.2)],
        prediction: 12.0,
        baseline_prediction: 47.2,
        dominant_feature: "is_rainy".into(),
        dominant_impact: -35.2,
        direction: Direction::Decreasing,
    };
    let text = explanation_text(&result);
    assert!(text.contains("is_rainy"));
    assert!(text.contains("decreasing"));
    assert!(text.contains("-35.20"));
    assert!(text.contains("Rain is cutting open-air bookings"));
}

#[test]
fn test_explanation_text_event_special_case() {
    let result = AttributionResult {
        contributions: vec![("nearby_event".into(), 24.8)],
        prediction: 70.0,
        baseline_prediction: 45.2,
        dominant_feature: "nearby_event".into(),
        dominant_impact: 24.8,
        direction: Direction::Increasing,
    };
    let text = explanation_text(&result);
    assert!(text.contains("increasing"));
    assert!(text.contains("match or concert"));
}

#[test]
fn test_explanation_text_plain_feature() {
    let result = AttributionResult {
        contributions: vec![("price".into(), -12.4)],
        prediction: 30.0,
        baseline_prediction: 42.4,
        dominant_feature: "price".into(),
        dominant_impact: -12.4,
        direction: Direction::Decreasing,
    };
    let text = explanation_text(&result);
    assert!(text.contains("price"));
    assert!(!text.contains("Rain is cutting"));
    assert!(!text.contains("match or concert"));
}
