//! Death-benefit (deces) transmission taxation: articles 990 I and 757 B,
//! Loi Tepa exemption, dismembered beneficiary clauses

mod engine;
mod types;

pub use engine::compute_death_benefit_tax;
pub use types::{
    Beneficiary, BeneficiaryTaxResult, ClauseKind, ClauseType, ContractDecesInput, DecesResult,
    Usufructuary,
};
