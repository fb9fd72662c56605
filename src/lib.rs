//! av_fiscalite - French life-insurance (assurance vie) tax computation engine
//!
//! This library provides three independent, stateless calculators:
//! - Withdrawal (rachat) taxation: PFU vs progressive-IR comparison
//! - Death-benefit (deces) transmission taxation: articles 990 I / 757 B,
//!   Loi Tepa exemption, dismembered (usufruct / bare-ownership) clauses
//! - Fee-erosion simulation: month-by-month capital projection with and
//!   without contract fees
//!
//! Statutory tables (succession brackets, CGI art. 669 usufruct scale,
//! progressive income-tax scale) live in [`bareme`]. Every engine is a pure
//! function over a validated input struct; invalid inputs are rejected with
//! a [`ValidationError`].

pub mod bareme;
pub mod deces;
pub mod error;
pub mod frais;
pub mod rachat;

// Re-export commonly used types
pub use deces::{compute_death_benefit_tax, ContractDecesInput, DecesResult};
pub use error::ValidationError;
pub use frais::{simulate_fee_erosion, FeeSimParams, FeeSimResult};
pub use rachat::{compute_withdrawal_tax, ContractRachatInput, RachatResult};
