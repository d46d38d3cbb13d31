//! Gradient-boosted demand regression.
//!
//! Trains a fixed-seed 80/20 split over the observation history, fits an
//! ensemble of depth-limited regression trees on squared-error residuals,
//! and reports RMSE/MAE on the held-out partition. The trained artifact is
//! immutable and safe to share across read-only inference calls.

use serde::{Deserialize, Serialize};
use sportpulse_core::{
    metrics::{mae, rmse, ModelMetrics},
    DemandPredictor, FeatureVector, ModelConfig, Observation, Result, SportPulseError,
    FEATURE_COUNT,
};
use tracing::{debug, info};

use crate::tree::{RegressionTree, TreeParams};

/// Immutable artifact produced by training. Owns no external references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedDemandModel {
    trees: Vec<RegressionTree>,
    learning_rate: f64,
    base_score: f64,
    feature_means: [f64; FEATURE_COUNT],
}

impl TrainedDemandModel {
    fn raw_predict(&self, values: &[f64; FEATURE_COUNT]) -> f64 {
        let mut acc = self.base_score;
        for tree in &self.trees {
            acc += self.learning_rate * tree.predict(values);
        }
        acc
    }
}

impl DemandPredictor for TrainedDemandModel {
    /// Demand estimate, clamped to be non-negative. The upper bound at
    /// facility capacity is the caller's responsibility.
    fn predict_values(&self, values: &[f64; FEATURE_COUNT]) -> f64 {
        self.raw_predict(values).max(0.0)
    }

    fn raw_values(&self, values: &[f64; FEATURE_COUNT]) -> f64 {
        self.raw_predict(values)
    }

    fn baseline_values(&self) -> [f64; FEATURE_COUNT] {
        self.feature_means
    }
}

/// Training entry point for the demand regressor.
pub struct DemandModel;

impl DemandModel {
    /// Train on historical observations and evaluate on a held-out split.
    pub fn train(
        observations: &[Observation],
        config: &ModelConfig,
    ) -> Result<(TrainedDemandModel, ModelMetrics)> {
        let n = observations.len();
        if n < config.min_train_samples {
            return Err(SportPulseError::InsufficientData(format!(
                "demand model training requires at least {} observations, got {n}",
                config.min_train_samples
            )));
        }

        let rows: Vec<[f64; FEATURE_COUNT]> = observations
            .iter()
            .map(|o| o.features().to_values())
            .collect();
        let targets: Vec<f64> = observations.iter().map(|o| o.y).collect();

        let (train_idx, test_idx) = split_indices(n, config.test_fraction, config.split_seed);
        info!(
            observations = n,
            train = train_idx.len(),
            test = test_idx.len(),
            rounds = config.n_rounds,
            "Training demand model"
        );

        let base_score =
            train_idx.iter().map(|&i| targets[i]).sum::<f64>() / train_idx.len() as f64;

        let mut feature_means = [0.0; FEATURE_COUNT];
        for &i in &train_idx {
            for (mean, v) in feature_means.iter_mut().zip(rows[i].iter()) {
                *mean += v;
            }
        }
        for mean in feature_means.iter_mut() {
            *mean /= train_idx.len() as f64;
        }

        let params = TreeParams {
            max_depth: config.max_depth,
            min_leaf_samples: config.min_leaf_samples,
        };

        let mut trees = Vec::with_capacity(config.n_rounds);
        let mut predictions = vec![base_score; n];
        let mut residuals = vec![0.0; n];

        for round in 0..config.n_rounds {
            for &i in &train_idx {
                residuals[i] = targets[i] - predictions[i];
            }
            let tree = RegressionTree::fit(&rows, &residuals, &train_idx, params);
            for &i in &train_idx {
                predictions[i] += config.learning_rate * tree.predict(&rows[i]);
            }
            trees.push(tree);

            if (round + 1) % 25 == 0 {
                let train_rmse = {
                    let preds: Vec<f64> = train_idx.iter().map(|&i| predictions[i]).collect();
                    let actual: Vec<f64> = train_idx.iter().map(|&i| targets[i]).collect();
                    rmse(&preds, &actual)
                };
                debug!(round = round + 1, train_rmse, "Boosting progress");
            }
        }

        let model = TrainedDemandModel {
            trees,
            learning_rate: config.learning_rate,
            base_score,
            feature_means,
        };

        let test_preds: Vec<f64> = test_idx
            .iter()
            .map(|&i| model.predict_values(&rows[i]))
            .collect();
        let test_actual: Vec<f64> = test_idx.iter().map(|&i| targets[i]).collect();
        let metrics = ModelMetrics {
            rmse: rmse(&test_preds, &test_actual),
            mae: mae(&test_preds, &test_actual),
            test_samples: test_idx.len(),
        };

        info!(
            rmse = format!("{:.4}", metrics.rmse),
            mae = format!("{:.4}", metrics.mae),
            test_samples = metrics.test_samples,
            "Demand model training complete"
        );

        Ok((model, metrics))
    }
}

/// Deterministic shuffled train/test split (Fisher-Yates over an LCG).
fn split_indices(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut state = seed;
    for i in (1..n).rev() {
        // LCG parameters (Numerical Recipes)
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let j = ((state >> 33) as usize) % (i + 1);
        indices.swap(i, j);
    }

    let mut test_len = (n as f64 * test_fraction).round() as usize;
    test_len = test_len.clamp(1, n - 1);
    let test = indices[..test_len].to_vec();
    let train = indices[test_len..].to_vec();
    (train, test)
}

/// Stateful facade pairing the trained artifact with its metrics.
///
/// Training is a one-shot operation; publish the engine (or the artifact it
/// exposes) before any inference begins.
pub struct DemandEngine {
    config: ModelConfig,
    model: Option<TrainedDemandModel>,
    metrics: Option<ModelMetrics>,
}

impl DemandEngine {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            model: None,
            metrics: None,
        }
    }

    pub fn train(&mut self, observations: &[Observation]) -> Result<()> {
        let (model, metrics) = DemandModel::train(observations, &self.config)?;
        self.model = Some(model);
        self.metrics = Some(metrics);
        Ok(())
    }

    /// The trained artifact, for injection into attribution and pricing.
    pub fn model(&self) -> Result<&TrainedDemandModel> {
        self.model
            .as_ref()
            .ok_or_else(|| SportPulseError::NotTrained("demand model".into()))
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        Ok(self.model()?.predict(features))
    }

    pub fn metrics(&self) -> Result<&ModelMetrics> {
        self.metrics
            .as_ref()
            .ok_or_else(|| SportPulseError::NotTrained("demand model metrics".into()))
    }
}

impl Default for DemandEngine {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}
