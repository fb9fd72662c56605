//! Withdrawal tax computation: taxable interest share, PFU vs IR paths

use log::debug;

use super::types::{ContractAge, ContractRachatInput, RachatResult};
use crate::error::ValidationError;

/// Social levies (prelevements sociaux), due whichever option is elected
const SOCIAL_LEVIES_RATE: f64 = 0.172;

/// Flat-rate income tax under the PFU option
const PFU_RATE: f64 = 0.128;

/// Annual allowance on interest after 8 years, single-part household
const ALLOWANCE_SINGLE: f64 = 4_600.0;

/// Annual allowance on interest after 8 years, household with 2+ fiscal parts
const ALLOWANCE_COUPLE: f64 = 9_200.0;

/// Compute the taxation of a withdrawal under both the PFU and the
/// progressive-IR options and compare the two.
pub fn compute_withdrawal_tax(
    input: &ContractRachatInput,
) -> Result<RachatResult, ValidationError> {
    validate(input)?;

    // Pro-rata share of the contract's gains embedded in this withdrawal
    let total_interest = (input.contract_value - input.total_premiums_paid).max(0.0);
    let taxable_interest_share =
        total_interest * (input.withdrawal_amount / input.contract_value);

    let social_levies = taxable_interest_share * SOCIAL_LEVIES_RATE;

    // PFU option: flat 12.8%, no allowance ever
    let tax_pfu = taxable_interest_share * PFU_RATE;
    let net_pfu = input.withdrawal_amount - tax_pfu - social_levies;

    // Progressive-IR option: allowance only after 8 years, capped at the interest
    let allowance = match input.contract_age {
        ContractAge::Over8Years => {
            let statutory = if input.fiscal_parts_count >= 2.0 {
                ALLOWANCE_COUPLE
            } else {
                ALLOWANCE_SINGLE
            };
            input
                .allowance_override
                .unwrap_or(statutory)
                .min(taxable_interest_share)
        }
        ContractAge::Under8Years => 0.0,
    };
    let taxable_base_ir = (taxable_interest_share - allowance).max(0.0);
    let tax_ir = taxable_base_ir * (input.marginal_tax_rate_percent / 100.0);
    let net_ir = input.withdrawal_amount - tax_ir - social_levies;

    let effective_rate = |tax: f64| {
        if input.withdrawal_amount > 0.0 {
            (tax + social_levies) / input.withdrawal_amount * 100.0
        } else {
            0.0
        }
    };
    let effective_rate_pfu = effective_rate(tax_pfu);
    let effective_rate_ir = effective_rate(tax_ir);

    // Saving of each option measured against the other's total cost
    let cost_pfu = tax_pfu + social_levies;
    let cost_ir = tax_ir + social_levies;
    let saving_pfu = (cost_ir - cost_pfu).max(0.0);
    let saving_ir = (cost_pfu - cost_ir).max(0.0);

    debug!(
        "rachat: interest={:.2} levies={:.2} pfu={:.2} allowance={:.2} ir={:.2}",
        taxable_interest_share, social_levies, tax_pfu, allowance, tax_ir
    );

    let mut warnings = Vec::new();
    let mut advice = Vec::new();

    let message = if taxable_interest_share == 0.0 {
        "No taxable interest: premiums paid meet or exceed the contract value.".to_string()
    } else if taxable_base_ir == 0.0 && input.contract_age == ContractAge::Over8Years {
        advice.push(format!(
            "Saving of {:.0} EUR compared with the PFU option.",
            saving_ir
        ));
        "IR path optimal: zero income tax thanks to the allowance \
         (only the 17.2% social levies are due)."
            .to_string()
    } else if net_pfu > net_ir {
        format!("PFU more favorable: +{:.0} EUR net.", net_pfu - net_ir)
    } else if net_ir > net_pfu {
        format!("Progressive IR more favorable: +{:.0} EUR net.", net_ir - net_pfu)
    } else {
        "Both options yield the same net amount.".to_string()
    };

    if input.contract_age == ContractAge::Under8Years
        && taxable_interest_share > ALLOWANCE_SINGLE
    {
        warnings.push(
            "Contract under 8 years: no allowance applies. Consider waiting \
             for the 8-year seniority."
                .to_string(),
        );
    }

    if input.contract_age == ContractAge::Over8Years && taxable_interest_share > allowance {
        advice.push(format!(
            "With {:.0} EUR of interest and a {:.0} EUR allowance, part of the \
             interest remains taxable.",
            taxable_interest_share, allowance
        ));
    }

    if input.marginal_tax_rate_percent >= 30.0
        && input.contract_age == ContractAge::Over8Years
    {
        advice.push(
            "High marginal rate: the progressive IR path is often more \
             favorable than the PFU thanks to the post-8-year allowance."
                .to_string(),
        );
    }

    if taxable_interest_share > 0.0 {
        advice.push(format!(
            "The {:.0} EUR of interest adds to the reference fiscal income \
             (RFR) whichever option is elected.",
            taxable_interest_share
        ));
    }

    Ok(RachatResult {
        taxable_interest_share,
        social_levies,
        tax_pfu,
        allowance,
        taxable_base_ir,
        tax_ir,
        net_pfu,
        net_ir,
        effective_rate_pfu,
        effective_rate_ir,
        saving_pfu,
        saving_ir,
        message,
        warnings,
        advice,
    })
}

fn validate(input: &ContractRachatInput) -> Result<(), ValidationError> {
    if input.contract_value <= 0.0 {
        return Err(ValidationError::new("contract value must be positive"));
    }
    if input.total_premiums_paid < 0.0 || input.withdrawal_amount < 0.0 {
        return Err(ValidationError::new("amounts must be non-negative"));
    }
    if input.withdrawal_amount > input.contract_value {
        return Err(ValidationError::new(
            "withdrawal amount cannot exceed the contract value",
        ));
    }
    if input.total_premiums_paid > input.contract_value {
        return Err(ValidationError::new(
            "total premiums paid cannot exceed the contract value",
        ));
    }
    if input.marginal_tax_rate_percent < 0.0 || input.marginal_tax_rate_percent > 100.0 {
        return Err(ValidationError::new(
            "marginal tax rate must be between 0 and 100",
        ));
    }
    if input.fiscal_parts_count < 1.0 {
        return Err(ValidationError::new("fiscal parts count must be at least 1"));
    }
    if let Some(allowance) = input.allowance_override {
        if allowance < 0.0 {
            return Err(ValidationError::new(
                "allowance override must be non-negative",
            ));
        }
    }
    Ok(())
}
