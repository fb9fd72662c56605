//! Input and result structures for the fee-erosion simulator

use serde::{Deserialize, Serialize};

/// One annual rate per fund bucket, 0-100
///
/// Buckets: guaranteed fund (fonds euros), unit-linked (UC) and managed
/// mandate (gestion sous mandat).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketRates {
    pub guaranteed: f64,
    pub uc: f64,
    pub managed: f64,
}

/// Simulation parameters
///
/// Allocation percentages are 0-100; whatever is not allocated to UC or the
/// managed mandate sits on the guaranteed fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSimParams {
    pub duration_years: u32,
    pub initial_deposit: f64,
    pub monthly_deposit: f64,

    pub fund_allocation_percent_uc: f64,
    pub fund_allocation_percent_managed: f64,

    pub annual_return_by_bucket: BucketRates,
    pub annual_management_fee_by_bucket: BucketRates,

    /// Fee taken off every deposit before it is credited, 0-100
    pub entry_fee_percent: f64,

    /// Fee per arbitrage, applied yearly on total capital, 0-100
    pub arbitrage_fee_percent: f64,
    pub arbitrage_count_per_year: u32,
}

/// Capital snapshot at the end of one month (month 0 = initial deposit)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: u32,
    pub total: f64,
    pub guaranteed: f64,
    pub uc: f64,
    pub managed: f64,
}

/// Cumulated fees by category over the with-fees pass
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeeTotals {
    pub entry: f64,
    pub management: f64,
    pub arbitrage: f64,
    pub total: f64,
}

/// Comparison of the with-fees and fee-free projections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSimResult {
    pub with_fees: Vec<MonthlyPoint>,
    pub without_fees: Vec<MonthlyPoint>,

    pub totals_by_fee_category: FeeTotals,

    pub final_capital_with_fees: f64,
    pub final_capital_without_fees: f64,

    /// Capital lost to fees over the whole horizon
    pub difference: f64,

    /// Initial deposit plus every monthly deposit, gross of entry fees
    pub total_contributions: f64,

    /// Gross gain over contributions under each pass
    pub return_with_fees: f64,
    pub return_without_fees: f64,

    /// Share of the fee-free return eaten by fees, 0-100
    pub return_erosion_percent: f64,

    /// Annualized return over contributions under each pass, 0-100
    pub annualized_return_percent_with_fees: f64,
    pub annualized_return_percent_without_fees: f64,
}
