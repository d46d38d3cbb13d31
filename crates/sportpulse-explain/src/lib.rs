mod engine;
mod shapley;

pub use engine::{explanation_text, AttributionEngine, AttributionResult, Direction};
pub use shapley::{AttributionStrategy, ShapleyAttribution};
