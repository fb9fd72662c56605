//! Fee-erosion simulator: month-by-month capital projection with and
//! without contract fees

mod engine;
mod types;

pub use engine::simulate_fee_erosion;
pub use types::{BucketRates, FeeSimParams, FeeSimResult, FeeTotals, MonthlyPoint};
