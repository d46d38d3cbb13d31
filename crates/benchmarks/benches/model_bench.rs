//! Benchmarks for the demand model pipeline.
//!
//! Covers: training, single prediction, attribution, price grid search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sportpulse_core::{
    DemandPredictor, FeatureVector, GeneratorConfig, ModelConfig, PricingConfig, NO_EVENT_DISTANCE,
};
use sportpulse_data::generate_observations;
use sportpulse_explain::AttributionEngine;
use sportpulse_model::DemandModel;
use sportpulse_pricing::optimize;

fn evening_slot() -> FeatureVector {
    FeatureVector::new(19, true, 22.0, false, false, NO_EVENT_DISTANCE, 130.0)
        .expect("valid slot")
}

fn bench_train(c: &mut Criterion) {
    let mut group = c.benchmark_group("train_demand_model");
    group.sample_size(10);

    for days in [15, 30, 60] {
        let observations = generate_observations(&GeneratorConfig { days, seed: 42 });
        group.bench_with_input(
            BenchmarkId::from_parameter(days),
            &observations,
            |b, obs| b.iter(|| DemandModel::train(black_box(obs), &ModelConfig::default())),
        );
    }

    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let observations = generate_observations(&GeneratorConfig { days: 30, seed: 42 });
    let (model, _) = DemandModel::train(&observations, &ModelConfig::default()).expect("train");
    let slot = evening_slot();

    c.bench_function("predict_single_slot", |b| {
        b.iter(|| model.predict(black_box(&slot)))
    });
}

fn bench_attribution(c: &mut Criterion) {
    let observations = generate_observations(&GeneratorConfig { days: 30, seed: 42 });
    let (model, _) = DemandModel::train(&observations, &ModelConfig::default()).expect("train");
    let engine = AttributionEngine::default();
    let slot = evening_slot();

    c.bench_function("shapley_attribution", |b| {
        b.iter(|| engine.explain(black_box(&model), black_box(&slot)))
    });
}

fn bench_price_optimization(c: &mut Criterion) {
    let observations = generate_observations(&GeneratorConfig { days: 30, seed: 42 });
    let (model, _) = DemandModel::train(&observations, &ModelConfig::default()).expect("train");
    let slot = evening_slot();
    let config = PricingConfig::default();

    c.bench_function("price_grid_optimize", |b| {
        b.iter(|| optimize(black_box(&model), black_box(&slot), &config))
    });
}

criterion_group!(
    benches,
    bench_train,
    bench_predict,
    bench_attribution,
    bench_price_optimization
);
criterion_main!(benches);
