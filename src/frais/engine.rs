//! Month-loop capital projection under entry, management and arbitrage fees

use log::debug;

use super::types::{BucketRates, FeeSimParams, FeeSimResult, FeeTotals, MonthlyPoint};
use crate::error::ValidationError;

/// Interactive-use bound on the projection horizon (480 months)
const MAX_DURATION_YEARS: u32 = 40;

/// Capital per bucket during a pass
#[derive(Debug, Clone, Copy, Default)]
struct Buckets {
    guaranteed: f64,
    uc: f64,
    managed: f64,
}

impl Buckets {
    fn total(&self) -> f64 {
        self.guaranteed + self.uc + self.managed
    }

    fn credit_split(&mut self, amount: f64, allocation: &BucketRates) {
        self.guaranteed += amount * allocation.guaranteed / 100.0;
        self.uc += amount * allocation.uc / 100.0;
        self.managed += amount * allocation.managed / 100.0;
    }

    fn point(&self, month: u32) -> MonthlyPoint {
        MonthlyPoint {
            month,
            total: self.total(),
            guaranteed: self.guaranteed,
            uc: self.uc,
            managed: self.managed,
        }
    }
}

/// Project capital month by month, once with fees and once without, and
/// report where the fee drag lands.
pub fn simulate_fee_erosion(params: &FeeSimParams) -> Result<FeeSimResult, ValidationError> {
    validate(params)?;

    let (without_fees, _) = run_pass(params, false);
    let (with_fees, totals_by_fee_category) = run_pass(params, true);

    let final_capital_without_fees = without_fees.last().map(|p| p.total).unwrap_or(0.0);
    let final_capital_with_fees = with_fees.last().map(|p| p.total).unwrap_or(0.0);
    let difference = final_capital_without_fees - final_capital_with_fees;

    let months = params.duration_years * 12;
    let total_contributions =
        params.initial_deposit + params.monthly_deposit * months as f64;

    let return_without_fees = final_capital_without_fees - total_contributions;
    let return_with_fees = final_capital_with_fees - total_contributions;
    let return_erosion_percent = if return_without_fees > 0.0 {
        difference / return_without_fees * 100.0
    } else {
        0.0
    };

    let annualize = |final_capital: f64| {
        if total_contributions > 0.0 && final_capital > 0.0 {
            ((final_capital / total_contributions).powf(1.0 / params.duration_years as f64)
                - 1.0)
                * 100.0
        } else {
            0.0
        }
    };

    debug!(
        "frais: final with={:.2} without={:.2} fees={:.2}",
        final_capital_with_fees, final_capital_without_fees, totals_by_fee_category.total
    );

    Ok(FeeSimResult {
        annualized_return_percent_with_fees: annualize(final_capital_with_fees),
        annualized_return_percent_without_fees: annualize(final_capital_without_fees),
        with_fees,
        without_fees,
        totals_by_fee_category,
        final_capital_with_fees,
        final_capital_without_fees,
        difference,
        total_contributions,
        return_with_fees,
        return_without_fees,
        return_erosion_percent,
    })
}

/// One full projection pass over the horizon
fn run_pass(params: &FeeSimParams, with_fees: bool) -> (Vec<MonthlyPoint>, FeeTotals) {
    let allocation = BucketRates {
        guaranteed: 100.0
            - params.fund_allocation_percent_uc
            - params.fund_allocation_percent_managed,
        uc: params.fund_allocation_percent_uc,
        managed: params.fund_allocation_percent_managed,
    };

    let months = params.duration_years * 12;
    let mut buckets = Buckets::default();
    let mut totals = FeeTotals::default();
    let mut series = Vec::with_capacity(months as usize + 1);

    // Month 0: initial deposit, net of the entry fee when fees apply
    let mut initial = params.initial_deposit;
    if with_fees {
        let fee = initial * params.entry_fee_percent / 100.0;
        initial -= fee;
        totals.entry += fee;
    }
    buckets.credit_split(initial, &allocation);
    series.push(buckets.point(0));

    for month in 1..=months {
        // Monthly deposit, entry fee off the top
        if params.monthly_deposit > 0.0 {
            let mut deposit = params.monthly_deposit;
            if with_fees {
                let fee = deposit * params.entry_fee_percent / 100.0;
                deposit -= fee;
                totals.entry += fee;
            }
            buckets.credit_split(deposit, &allocation);
        }

        // Monthly return per bucket
        let returns = &params.annual_return_by_bucket;
        buckets.guaranteed *= 1.0 + returns.guaranteed / 100.0 / 12.0;
        buckets.uc *= 1.0 + returns.uc / 100.0 / 12.0;
        buckets.managed *= 1.0 + returns.managed / 100.0 / 12.0;

        if with_fees {
            // Monthly-equivalent management fee, proportional to each
            // bucket's balance
            let fees = &params.annual_management_fee_by_bucket;
            let fee_guaranteed = buckets.guaranteed * fees.guaranteed / 100.0 / 12.0;
            let fee_uc = buckets.uc * fees.uc / 100.0 / 12.0;
            let fee_managed = buckets.managed * fees.managed / 100.0 / 12.0;
            buckets.guaranteed -= fee_guaranteed;
            buckets.uc -= fee_uc;
            buckets.managed -= fee_managed;
            totals.management += fee_guaranteed + fee_uc + fee_managed;

            // Arbitrage fees settle once a year on total capital
            if month % 12 == 0 && params.arbitrage_count_per_year > 0 {
                let rate = params.arbitrage_fee_percent / 100.0
                    * params.arbitrage_count_per_year as f64;
                totals.arbitrage += buckets.total() * rate;
                buckets.guaranteed *= 1.0 - rate;
                buckets.uc *= 1.0 - rate;
                buckets.managed *= 1.0 - rate;
            }
        }

        series.push(buckets.point(month));
    }

    totals.total = totals.entry + totals.management + totals.arbitrage;
    (series, totals)
}

fn validate(params: &FeeSimParams) -> Result<(), ValidationError> {
    if params.duration_years == 0 {
        return Err(ValidationError::new("duration must be positive"));
    }
    if params.duration_years > MAX_DURATION_YEARS {
        return Err(ValidationError::new("duration cannot exceed 40 years"));
    }
    if params.initial_deposit < 0.0 || params.monthly_deposit < 0.0 {
        return Err(ValidationError::new("deposit amounts must be non-negative"));
    }
    let uc = params.fund_allocation_percent_uc;
    let managed = params.fund_allocation_percent_managed;
    if uc < 0.0 || managed < 0.0 {
        return Err(ValidationError::new(
            "allocation percentages must be non-negative",
        ));
    }
    if uc + managed > 100.0 {
        return Err(ValidationError::new(
            "UC and managed allocations cannot exceed 100% combined",
        ));
    }
    let fees = &params.annual_management_fee_by_bucket;
    if params.entry_fee_percent < 0.0
        || params.arbitrage_fee_percent < 0.0
        || fees.guaranteed < 0.0
        || fees.uc < 0.0
        || fees.managed < 0.0
    {
        return Err(ValidationError::new("fee percentages must be non-negative"));
    }
    Ok(())
}
