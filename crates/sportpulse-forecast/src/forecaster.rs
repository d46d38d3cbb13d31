//! Long-horizon weekly demand forecasting.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sportpulse_core::{ForecastConfig, Observation, Result, SportPulseError};
use tracing::info;

use crate::sarima::{SarimaModel, SeasonalModel};
use crate::weekly::{aggregate_weekly, WeeklySeries};

/// One forecast step with its confidence bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub week_start: NaiveDate,
    pub forecast: f64,
    pub lower_ci: f64,
    pub upper_ci: f64,
}

/// Multi-week-ahead forecast. `lower_ci <= forecast <= upper_ci` holds for
/// every point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    pub points: Vec<ForecastPoint>,
    pub model_name: String,
    pub confidence_level: f64,
}

/// Fits a seasonal model on a weekly series and dates its forecast steps.
pub struct SeasonalForecaster {
    model: Box<dyn SeasonalModel>,
}

impl SeasonalForecaster {
    pub fn new(model: Box<dyn SeasonalModel>) -> Self {
        Self { model }
    }

    pub fn forecast(&mut self, series: &WeeklySeries, horizon: usize) -> Result<ForecastResult> {
        let last = series.last().ok_or_else(|| {
            SportPulseError::ForecastUnfittable("weekly series is empty".into())
        })?;

        let values: Vec<f64> = series.iter().map(|p| p.mean_demand).collect();
        self.model.fit(&values)?;
        let forecast = self.model.forecast(horizon)?;

        let points = (0..horizon)
            .map(|h| ForecastPoint {
                week_start: last.week_start + Duration::weeks(h as i64 + 1),
                forecast: forecast.mean[h],
                lower_ci: forecast.lower[h],
                upper_ci: forecast.upper[h],
            })
            .collect();

        info!(
            history_weeks = series.len(),
            horizon = horizon,
            model = self.model.name(),
            "Weekly forecast complete"
        );

        Ok(ForecastResult {
            points,
            model_name: self.model.name().to_string(),
            confidence_level: forecast.confidence_level,
        })
    }
}

/// Aggregate observations to weekly means and forecast ahead.
///
/// Returns the `(history, forecast)` pair consumed by presentation layers.
pub fn build_weekly_forecast(
    observations: &[Observation],
    config: &ForecastConfig,
) -> Result<(WeeklySeries, ForecastResult)> {
    let series = aggregate_weekly(observations);
    let model = SarimaModel::new(config.seasonal_period, config.confidence_level);
    let mut forecaster = SeasonalForecaster::new(Box::new(model));
    let result = forecaster.forecast(&series, config.horizon_weeks)?;
    Ok((series, result))
}
