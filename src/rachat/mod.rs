//! Withdrawal (rachat) taxation: PFU vs progressive-IR comparison

mod engine;
mod types;

pub use engine::compute_withdrawal_tax;
pub use types::{ContractAge, ContractRachatInput, RachatResult};
