mod forecaster;
mod sarima;
mod weekly;

pub use forecaster::{build_weekly_forecast, ForecastPoint, ForecastResult, SeasonalForecaster};
pub use sarima::{SarimaModel, SeasonalForecast, SeasonalModel};
pub use weekly::{aggregate_weekly, WeeklyPoint, WeeklySeries};
