//! Input and result structures for the withdrawal tax engine

use serde::{Deserialize, Serialize};

/// Contract seniority relative to the 8-year allowance threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractAge {
    Under8Years,
    Over8Years,
}

/// Inputs for a partial or total withdrawal simulation
///
/// All amounts in euros; percentages as 0-100 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRachatInput {
    /// Current surrender value of the contract
    pub contract_value: f64,

    /// Total premiums paid in since inception
    pub total_premiums_paid: f64,

    /// Amount withdrawn in this rachat
    pub withdrawal_amount: f64,

    /// Contract seniority bucket
    pub contract_age: ContractAge,

    /// Marginal income-tax rate (TMI) of the household, 0-100
    pub marginal_tax_rate_percent: f64,

    /// Number of fiscal parts in the household (>= 1)
    pub fiscal_parts_count: f64,

    /// Replacement for the statutory 4,600/9,200 EUR allowance, e.g. when
    /// part of it was consumed by an earlier withdrawal in the same year.
    /// Only honored for contracts over 8 years.
    #[serde(default)]
    pub allowance_override: Option<f64>,
}

/// Outcome of the PFU vs progressive-IR comparison for one withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RachatResult {
    /// Interest embedded in the withdrawal, pro-rata of the contract's gains
    pub taxable_interest_share: f64,

    /// Social levies (17.2%), due under either option
    pub social_levies: f64,

    /// Income tax under the flat-rate option (12.8%, no allowance)
    pub tax_pfu: f64,

    /// Allowance actually applied on the progressive-IR path
    pub allowance: f64,

    /// Taxable base on the IR path after allowance
    pub taxable_base_ir: f64,

    /// Income tax under the progressive option (TMI on the base)
    pub tax_ir: f64,

    /// Net received under each option
    pub net_pfu: f64,
    pub net_ir: f64,

    /// Effective rate of (tax + levies) over the withdrawal, 0-100
    pub effective_rate_pfu: f64,
    pub effective_rate_ir: f64,

    /// Saving of each option over the other (0 for the losing option)
    pub saving_pfu: f64,
    pub saving_ir: f64,

    /// Headline comparison message
    pub message: String,

    /// Situations that deserve attention before withdrawing
    pub warnings: Vec<String>,

    /// Optimization suggestions
    pub advice: Vec<String>,
}
