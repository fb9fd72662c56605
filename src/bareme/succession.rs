//! Succession tax brackets by kinship (2024 schedule)

use serde::{Deserialize, Serialize};

/// Kinship between the deceased and a beneficiary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kinship {
    /// Spouse or PACS partner (fully exempt under Loi Tepa)
    Spouse,
    Child,
    Grandchild,
    Sibling,
    NephewNiece,
    /// No legal kinship (concubinage): 60% rate, no exemption
    Other,
}

impl Kinship {
    pub const ALL: [Kinship; 6] = [
        Kinship::Spouse,
        Kinship::Child,
        Kinship::Grandchild,
        Kinship::Sibling,
        Kinship::NephewNiece,
        Kinship::Other,
    ];
}

/// One marginal bracket: rate applies from `threshold_from` up to the next
/// bracket's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub threshold_from: f64,
    pub rate: f64,
}

/// Succession tax parameters for one kinship
#[derive(Debug, Clone, Copy)]
pub struct KinshipEntry {
    /// Statutory succession abatement for this kinship. Informational for
    /// the life-insurance regimes, which carry their own allowances
    /// (152,500 EUR per beneficiary under 990 I, 30,500 EUR global under 757 B).
    pub allowance: f64,
    /// Marginal brackets applied to the taxable remainder under 757 B
    pub brackets: &'static [Bracket],
    /// Loi Tepa full exemption (spouse/PACS)
    pub fully_exempt: bool,
}

const SPOUSE_BRACKETS: [Bracket; 1] = [Bracket {
    threshold_from: 0.0,
    rate: 0.0,
}];

const CHILD_BRACKETS: [Bracket; 1] = [Bracket {
    threshold_from: 0.0,
    rate: 0.20,
}];

const SIBLING_BRACKETS: [Bracket; 2] = [
    Bracket {
        threshold_from: 0.0,
        rate: 0.35,
    },
    Bracket {
        threshold_from: 24_430.0,
        rate: 0.45,
    },
];

const DEFAULT_BRACKETS: [Bracket; 1] = [Bracket {
    threshold_from: 0.0,
    rate: 0.60,
}];

/// Immutable kinship -> succession parameters lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct KinshipTaxTable;

impl KinshipTaxTable {
    /// Entry for a given kinship
    pub fn entry(&self, kinship: Kinship) -> KinshipEntry {
        match kinship {
            Kinship::Spouse => KinshipEntry {
                allowance: 80_724.0,
                brackets: &SPOUSE_BRACKETS,
                fully_exempt: true,
            },
            Kinship::Child => KinshipEntry {
                allowance: 100_000.0,
                brackets: &CHILD_BRACKETS,
                fully_exempt: false,
            },
            Kinship::Grandchild => KinshipEntry {
                allowance: 1_594.0,
                brackets: &DEFAULT_BRACKETS,
                fully_exempt: false,
            },
            Kinship::Sibling => KinshipEntry {
                allowance: 15_932.0,
                brackets: &SIBLING_BRACKETS,
                fully_exempt: false,
            },
            Kinship::NephewNiece => KinshipEntry {
                allowance: 7_967.0,
                brackets: &DEFAULT_BRACKETS,
                fully_exempt: false,
            },
            Kinship::Other => KinshipEntry {
                allowance: 1_594.0,
                brackets: &DEFAULT_BRACKETS,
                fully_exempt: false,
            },
        }
    }

    /// Whether this kinship is fully exempt from transmission tax (Loi Tepa)
    pub fn is_fully_exempt(&self, kinship: Kinship) -> bool {
        self.entry(kinship).fully_exempt
    }

    /// Apply this kinship's marginal brackets to a taxable base
    pub fn tax_on(&self, kinship: Kinship, taxable_base: f64) -> f64 {
        let entry = self.entry(kinship);
        if entry.fully_exempt || taxable_base <= 0.0 {
            return 0.0;
        }

        let mut tax = 0.0;
        for (i, bracket) in entry.brackets.iter().enumerate() {
            let upper = entry
                .brackets
                .get(i + 1)
                .map(|next| next.threshold_from)
                .unwrap_or(f64::INFINITY);
            if taxable_base <= bracket.threshold_from {
                break;
            }
            let slice = taxable_base.min(upper) - bracket.threshold_from;
            tax += slice * bracket.rate;
        }
        tax
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spouse_always_zero() {
        let table = KinshipTaxTable;
        assert!(table.is_fully_exempt(Kinship::Spouse));
        assert_eq!(table.tax_on(Kinship::Spouse, 1_000_000.0), 0.0);
    }

    #[test]
    fn test_child_flat_20() {
        let table = KinshipTaxTable;
        assert_relative_eq!(table.tax_on(Kinship::Child, 50_000.0), 10_000.0);
    }

    #[test]
    fn test_sibling_marginal_split() {
        let table = KinshipTaxTable;
        // Entirely inside the first bracket
        assert_relative_eq!(table.tax_on(Kinship::Sibling, 10_000.0), 3_500.0);
        // 24,430 at 35%, remainder at 45%
        let expected = 24_430.0 * 0.35 + (40_000.0 - 24_430.0) * 0.45;
        assert_relative_eq!(table.tax_on(Kinship::Sibling, 40_000.0), expected);
    }

    #[test]
    fn test_other_flat_60() {
        let table = KinshipTaxTable;
        assert_relative_eq!(table.tax_on(Kinship::Other, 10_000.0), 6_000.0);
        assert_relative_eq!(table.tax_on(Kinship::NephewNiece, 10_000.0), 6_000.0);
        assert_relative_eq!(table.tax_on(Kinship::Grandchild, 10_000.0), 6_000.0);
    }

    #[test]
    fn test_zero_or_negative_base() {
        let table = KinshipTaxTable;
        for kinship in Kinship::ALL {
            assert_eq!(table.tax_on(kinship, 0.0), 0.0);
            assert_eq!(table.tax_on(kinship, -1.0), 0.0);
        }
    }
}
