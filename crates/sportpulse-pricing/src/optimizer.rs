//! Revenue grid search over a discretized price set.
//!
//! The grid is scanned in ascending order and only a strict revenue
//! improvement replaces the current best, so the lowest price wins ties.
//! Revenue is not assumed unimodal in price; the full grid is evaluated.

use serde::{Deserialize, Serialize};
use sportpulse_core::{DemandPredictor, FeatureVector, PricingConfig};
use tracing::{debug, info};

/// One evaluated point on the price grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub demand: f64,
    pub revenue: f64,
}

/// Outcome of a grid search for a fixed context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecommendation {
    pub best: PricePoint,
    pub current: PricePoint,
    /// The full grid, in ascending price order.
    pub curve: Vec<PricePoint>,
    pub uplift_percent: f64,
}

fn evaluate(model: &dyn DemandPredictor, context: &FeatureVector, price: f64) -> PricePoint {
    let demand = model.predict(&context.with_price(price));
    PricePoint {
        price,
        demand,
        revenue: price * demand,
    }
}

/// Evaluate every grid price under the fixed context.
pub fn price_curve(
    model: &dyn DemandPredictor,
    context: &FeatureVector,
    config: &PricingConfig,
) -> Vec<PricePoint> {
    let steps = ((config.max_price - config.min_price) / config.price_step).round() as usize;
    (0..=steps)
        .map(|k| {
            let price = config.min_price + k as f64 * config.price_step;
            evaluate(model, context, price)
        })
        .collect()
}

/// Find the revenue-maximizing price for a fixed context.
///
/// `context.price` is the caller's current price; it seeds the initial best
/// with zero revenue, so the search never reports a worse outcome than the
/// grid can justify. Pure function of (model, context, grid).
pub fn optimize(
    model: &dyn DemandPredictor,
    context: &FeatureVector,
    config: &PricingConfig,
) -> PriceRecommendation {
    let current = evaluate(model, context, context.price);
    let curve = price_curve(model, context, config);

    let mut best = PricePoint {
        price: current.price,
        demand: 0.0,
        revenue: 0.0,
    };
    for point in &curve {
        if point.revenue > best.revenue {
            best = *point;
        }
        debug!(
            price = point.price,
            demand = format!("{:.2}", point.demand),
            revenue = format!("{:.2}", point.revenue),
            "Grid point"
        );
    }

    let uplift_percent = revenue_uplift_percent(current.revenue, best.revenue);
    info!(
        best_price = best.price,
        best_revenue = format!("{:.2}", best.revenue),
        uplift = format!("{:.1}%", uplift_percent),
        "Price optimization complete"
    );

    PriceRecommendation {
        best,
        current,
        curve,
        uplift_percent,
    }
}

/// Relative revenue gain of the optimized price over the current one.
/// Zero current revenue is treated as zero uplift, never a division error.
pub fn revenue_uplift_percent(current_revenue: f64, optimized_revenue: f64) -> f64 {
    if current_revenue > 0.0 {
        (optimized_revenue - current_revenue) / current_revenue * 100.0
    } else {
        0.0
    }
}
