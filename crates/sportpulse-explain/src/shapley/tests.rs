use super::*;
use sportpulse_core::NO_EVENT_DISTANCE;

/// Hand-checkable additive model: demand = intercept + Σ coef·x.
struct LinearModel {
    coef: [f64; FEATURE_COUNT],
    intercept: f64,
    baseline: [f64; FEATURE_COUNT],
}

impl DemandPredictor for LinearModel {
    fn predict_values(&self, values: &[f64; FEATURE_COUNT]) -> f64 {
        self.intercept
            + self
                .coef
                .iter()
                .zip(values.iter())
                .map(|(c, v)| c * v)
                .sum::<f64>()
    }

    fn baseline_values(&self) -> [f64; FEATURE_COUNT] {
        self.baseline
    }
}

#[test]
fn test_linear_model_exact_contributions() {
    // For an additive model the Shapley value of feature i is
    // coef_i * (x_i - baseline_i).
    let model = LinearModel {
        coef: [1.0, 15.0, 0.5, -40.0, 25.0, -0.2, -0.5],
        intercept: 20.0,
        baseline: [12.0, 0.0, 18.0, 0.0, 0.0, NO_EVENT_DISTANCE, 100.0],
    };
    let features = FeatureVector::new(19, true, 24.0, true, false, NO_EVENT_DISTANCE, 150.0).unwrap();

    let contributions = ShapleyAttribution.contributions(&model, &features);
    let instance = features.to_values();
    for i in 0..FEATURE_COUNT {
        let expected = model.coef[i] * (instance[i] - model.baseline[i]);
        assert!(
            (contributions[i] - expected).abs() < 1e-9,
            "feature {i}: got {}, expected {expected}",
            contributions[i]
        );
    }
}

#[test]
fn test_local_accuracy() {
    let model = LinearModel {
        coef: [2.0, 10.0, -1.0, -30.0, 20.0, -0.3, -0.4],
        intercept: 50.0,
        baseline: [11.5, 0.3, 15.0, 0.2, 0.05, 45.0, 120.0],
    };
    let features = FeatureVector::new(21, false, 30.0, true, true, 2.0, 90.0).unwrap();

    let contributions = ShapleyAttribution.contributions(&model, &features);
    let total: f64 = contributions.iter().sum();
    let expected = model.predict(&features) - model.predict_values(&model.baseline_values());
    assert!(
        (total - expected).abs() < 1e-9,
        "sum {total} vs prediction delta {expected}"
    );
}

#[test]
fn test_baseline_instance_has_zero_contributions() {
    let baseline = [10.0, 0.0, 20.0, 0.0, 0.0, NO_EVENT_DISTANCE, 100.0];
    let model = LinearModel {
        coef: [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
        intercept: 1.0,
        baseline,
    };
    let features = FeatureVector::new(10, false, 20.0, false, false, NO_EVENT_DISTANCE, 100.0).unwrap();
    let contributions = ShapleyAttribution.contributions(&model, &features);
    for c in contributions {
        assert!(c.abs() < 1e-12);
    }
}
