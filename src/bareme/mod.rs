//! Statutory tax tables: succession brackets, usufruct valuation, income-tax scale

mod ir;
mod succession;
mod usufruit;

pub use ir::{fiscal_parts, marginal_rate_percent, HouseholdStatus, IrScale};
pub use succession::{Bracket, Kinship, KinshipEntry, KinshipTaxTable};
pub use usufruit::UsufructScale;
