use thiserror::Error;

#[derive(Error, Debug)]
pub enum SportPulseError {
    #[error("data source not found: {0}")]
    DataSourceNotFound(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("model not trained: {0}")]
    NotTrained(String),

    #[error("forecast unfittable: {0}")]
    ForecastUnfittable(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SportPulseError>;
