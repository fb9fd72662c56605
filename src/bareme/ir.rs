//! Progressive income-tax scale (2024) and family-quotient helpers
//!
//! Used to derive a marginal tax rate (TMI) from a household's net taxable
//! income when the caller does not supply one directly.

use serde::{Deserialize, Serialize};

/// Household composition for the fiscal-parts rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdStatus {
    Single,
    Couple,
}

/// Progressive income-tax brackets, 2024 schedule
///
/// Thresholds apply to income per fiscal part (quotient familial).
#[derive(Debug, Clone, Copy, Default)]
pub struct IrScale;

impl IrScale {
    const BRACKETS: [(f64, f64); 5] = [
        (0.0, 0.0),
        (11_294.0, 11.0),
        (28_797.0, 30.0),
        (82_341.0, 41.0),
        (177_106.0, 45.0),
    ];

    /// Marginal rate (0-100) for a given income per fiscal part
    pub fn marginal_rate_for_quotient(&self, income_per_part: f64) -> f64 {
        let mut rate = 0.0;
        for &(threshold, bracket_rate) in Self::BRACKETS.iter() {
            if income_per_part >= threshold {
                rate = bracket_rate;
            }
        }
        rate
    }
}

/// Number of fiscal parts for a household
///
/// Half a part for each of the first two dependent children, a full part for
/// each child beyond the second.
pub fn fiscal_parts(status: HouseholdStatus, dependent_children: u32) -> f64 {
    let base = match status {
        HouseholdStatus::Single => 1.0,
        HouseholdStatus::Couple => 2.0,
    };
    let child_parts = if dependent_children <= 2 {
        0.5 * dependent_children as f64
    } else {
        1.0 + (dependent_children - 2) as f64
    };
    base + child_parts
}

/// Marginal income-tax rate (0-100) for a household's net taxable income
pub fn marginal_rate_percent(net_taxable_income: f64, parts: f64) -> f64 {
    if parts <= 0.0 || net_taxable_income <= 0.0 {
        return 0.0;
    }
    IrScale.marginal_rate_for_quotient(net_taxable_income / parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_boundaries() {
        let scale = IrScale;
        assert_eq!(scale.marginal_rate_for_quotient(0.0), 0.0);
        assert_eq!(scale.marginal_rate_for_quotient(11_293.0), 0.0);
        assert_eq!(scale.marginal_rate_for_quotient(11_294.0), 11.0);
        assert_eq!(scale.marginal_rate_for_quotient(28_797.0), 30.0);
        assert_eq!(scale.marginal_rate_for_quotient(82_341.0), 41.0);
        assert_eq!(scale.marginal_rate_for_quotient(200_000.0), 45.0);
    }

    #[test]
    fn test_fiscal_parts_rule() {
        assert_eq!(fiscal_parts(HouseholdStatus::Single, 0), 1.0);
        assert_eq!(fiscal_parts(HouseholdStatus::Single, 1), 1.5);
        assert_eq!(fiscal_parts(HouseholdStatus::Couple, 2), 3.0);
        // Third child and beyond count for a full part
        assert_eq!(fiscal_parts(HouseholdStatus::Couple, 3), 4.0);
        assert_eq!(fiscal_parts(HouseholdStatus::Couple, 4), 5.0);
    }

    #[test]
    fn test_quotient_lowers_marginal_rate() {
        // 60,000 EUR single: 30% bracket; same income over 3 parts: 11%
        assert_eq!(marginal_rate_percent(60_000.0, 1.0), 30.0);
        assert_eq!(marginal_rate_percent(60_000.0, 3.0), 11.0);
        assert_eq!(marginal_rate_percent(0.0, 2.0), 0.0);
    }
}
