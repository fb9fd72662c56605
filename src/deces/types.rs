//! Input and result structures for the death-benefit tax engine

use serde::{Deserialize, Serialize};

use crate::bareme::Kinship;

/// How the beneficiary clause as a whole is drafted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseType {
    /// Boilerplate "spouse, failing whom children" clause
    Standard,
    /// Individually drafted clause
    Custom,
    /// Usufruct / bare-ownership split
    Dismembered,
}

/// Nature of one beneficiary's entitlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    FullOwnership,
    Usufruct,
    BareOwnership,
}

impl Default for ClauseKind {
    fn default() -> Self {
        ClauseKind::FullOwnership
    }
}

/// Reference usufructuary of a dismembered pair; their age drives the
/// statutory art. 669 split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usufructuary {
    pub name: String,
    pub age: u8,
    pub kinship: Kinship,
}

/// One beneficiary row of the clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub name: String,
    pub kinship: Kinship,
    pub age: u8,

    /// Declared share of the contract, 0-100. Shares of all top-level
    /// beneficiaries are expected to sum to 100 (caller-enforced).
    pub share_of_contract_percent: f64,

    #[serde(default)]
    pub clause_kind: ClauseKind,

    /// Required when `clause_kind` is usufruct or bare ownership
    #[serde(default)]
    pub usufructuary: Option<Usufructuary>,
}

/// Inputs for a death-benefit transmission simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDecesInput {
    /// Contract value at the date of death
    pub contract_value_at_death: f64,

    /// Premiums paid before the insured's 70th birthday
    pub premiums_before_age70: f64,

    /// Premiums paid from age 70 on (0 when left blank upstream)
    #[serde(default)]
    pub premiums_after_age70: f64,

    pub clause_type: ClauseType,

    pub beneficiaries: Vec<Beneficiary>,
}

/// Per-beneficiary taxation detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryTaxResult {
    pub name: String,
    pub kinship: Kinship,
    pub clause_kind: ClauseKind,

    /// Capital received before tax
    pub gross_amount: f64,

    /// Share of the pre-70 (990 I) and post-70 (757 B) notional bases
    pub share_990i: f64,
    pub share_757b: f64,

    /// Allowances actually applied under each regime
    pub allowance_990i: f64,
    pub allowance_757b: f64,

    /// Taxable bases after allowances
    pub taxable_990i: f64,
    pub taxable_757b: f64,

    /// Tax due under each regime
    pub tax_990i: f64,
    pub tax_757b: f64,

    pub total_tax: f64,
    pub net_amount: f64,

    /// Total tax over gross amount, 0-100
    pub effective_rate_percent: f64,

    /// Fully exempt under Loi Tepa (spouse/PACS)
    pub tepa_exempt: bool,

    /// Dismemberment detail, present only for usufruct/bare-ownership rows
    pub usufruct_percent: Option<f64>,
    pub bare_ownership_percent: Option<f64>,
    pub usufructuary: Option<String>,
}

/// Full outcome of a death-benefit simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecesResult {
    pub beneficiaries: Vec<BeneficiaryTaxResult>,

    /// Always the full contract value
    pub total_transmitted: f64,
    pub total_tax: f64,
    pub total_net: f64,

    /// Total tax over total transmitted, 0-100
    pub global_effective_rate_percent: f64,

    /// Post-70 premium ratio used for the proportional base split, 0-100
    pub ratio_after70_percent: f64,

    /// Notional bases from the proportional split
    pub base_990i: f64,
    pub base_757b: f64,

    /// Optimization notes
    pub optimizations: Vec<String>,

    /// Situations that deserve attention
    pub alerts: Vec<String>,
}
