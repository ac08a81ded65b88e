//! Wellness insight aggregation.
//!
//! # Module Structure
//!
//! - `model`: Time windows, insight, achievement and recommendation types
//! - `aggregator`: The pure insight computation

mod aggregator;
mod model;

pub use aggregator::{check_in_streak, compute_insights};
pub use model::{
    Achievement, Insights, Recommendation, RecommendationKind, TimeWindow, TrendDirection,
};
