mod aggregator;
mod insights;

pub use aggregator::{
    occupancy_percent, summarize, FacilitySummary, OverallSummary, UtilizationReport,
};
pub use insights::{facility_geo, facility_insights, weekly_trend, FacilityGeo, FacilityInsight, WeeklyTrend};
