mod optimizer;

pub use optimizer::{
    optimize, price_curve, revenue_uplift_percent, PricePoint, PriceRecommendation,
};
