use serde::{Deserialize, Serialize};

/// Application-level configuration for the analytical core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Demand model training parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_n_rounds")]
    pub n_rounds: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_min_leaf_samples")]
    pub min_leaf_samples: usize,
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    #[serde(default = "default_split_seed")]
    pub split_seed: u64,
    #[serde(default = "default_min_train_samples")]
    pub min_train_samples: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_rounds: default_n_rounds(),
            learning_rate: default_learning_rate(),
            max_depth: default_max_depth(),
            min_leaf_samples: default_min_leaf_samples(),
            test_fraction: default_test_fraction(),
            split_seed: default_split_seed(),
            min_train_samples: default_min_train_samples(),
        }
    }
}

/// Price grid used by the revenue search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_min_price")]
    pub min_price: f64,
    #[serde(default = "default_max_price")]
    pub max_price: f64,
    #[serde(default = "default_price_step")]
    pub price_step: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            min_price: default_min_price(),
            max_price: default_max_price(),
            price_step: default_price_step(),
        }
    }
}

/// Seasonal forecaster parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_horizon_weeks")]
    pub horizon_weeks: usize,
    #[serde(default = "default_seasonal_period")]
    pub seasonal_period: usize,
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_weeks: default_horizon_weeks(),
            seasonal_period: default_seasonal_period(),
            confidence_level: default_confidence_level(),
        }
    }
}

/// Synthetic observation generator parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_generator_days")]
    pub days: usize,
    #[serde(default = "default_generator_seed")]
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            days: default_generator_days(),
            seed: default_generator_seed(),
        }
    }
}

fn default_n_rounds() -> usize {
    100
}
fn default_learning_rate() -> f64 {
    0.1
}
fn default_max_depth() -> usize {
    4
}
fn default_min_leaf_samples() -> usize {
    1
}
fn default_test_fraction() -> f64 {
    0.2
}
fn default_split_seed() -> u64 {
    42
}
fn default_min_train_samples() -> usize {
    10
}
fn default_min_price() -> f64 {
    50.0
}
fn default_max_price() -> f64 {
    300.0
}
fn default_price_step() -> f64 {
    10.0
}
fn default_horizon_weeks() -> usize {
    8
}
fn default_seasonal_period() -> usize {
    52
}
fn default_confidence_level() -> f64 {
    0.95
}
fn default_generator_days() -> usize {
    365
}
fn default_generator_seed() -> u64 {
    42
}
