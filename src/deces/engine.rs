//! Death-benefit tax computation
//!
//! The contract value is split between the 990 I (pre-70) and 757 B (post-70)
//! regimes proportionally to the premium ratio, rather than by tracing which
//! premiums produced which growth. This is a deliberate modeling choice; the
//! 757 B regime itself is then applied to the post-70 premium amount only,
//! never to its growth.

use log::debug;

use super::types::{
    Beneficiary, BeneficiaryTaxResult, ClauseKind, ClauseType, ContractDecesInput, DecesResult,
};
use crate::bareme::{Kinship, KinshipTaxTable, UsufructScale};
use crate::error::ValidationError;

/// Per-beneficiary allowance under article 990 I
const ALLOWANCE_990I: f64 = 152_500.0;

/// 990 I rate below and above the 700,000 EUR taxable threshold
const RATE_990I_LOW: f64 = 0.20;
const RATE_990I_HIGH: f64 = 0.3125;
const THRESHOLD_990I: f64 = 700_000.0;

/// Global allowance under article 757 B, shared across beneficiaries by
/// prorating on their effective shares
const ALLOWANCE_757B_GLOBAL: f64 = 30_500.0;

/// One taxable position derived from a beneficiary row: either the row
/// itself (full ownership) or its usufruct/bare-ownership sub-position.
struct Position {
    name: String,
    kinship: Kinship,
    clause_kind: ClauseKind,
    /// Fraction of the total contract this position receives
    effective_share: f64,
    /// Usufruct or bare-ownership fraction for dismembered positions;
    /// scales the 990 I allowance
    dismember_fraction: Option<f64>,
    usufruct_percent: Option<f64>,
    bare_ownership_percent: Option<f64>,
    usufructuary: Option<String>,
}

/// Compute transmission taxation of a contract at death across its
/// beneficiary clause.
pub fn compute_death_benefit_tax(
    input: &ContractDecesInput,
) -> Result<DecesResult, ValidationError> {
    validate(input)?;

    let contract_value = input.contract_value_at_death;
    let total_premiums = input.premiums_before_age70 + input.premiums_after_age70;

    // Proportional split of the whole contract between the two regimes
    let ratio_after70 = if total_premiums > 0.0 {
        input.premiums_after_age70 / total_premiums
    } else {
        0.0
    };
    let base_757b = ratio_after70 * contract_value;
    let base_990i = contract_value - base_757b;

    debug!(
        "deces: ratio_after70={:.4} base_990i={:.2} base_757b={:.2}",
        ratio_after70, base_990i, base_757b
    );

    let table = KinshipTaxTable;
    let mut results = Vec::with_capacity(input.beneficiaries.len());

    for beneficiary in &input.beneficiaries {
        let position = resolve_position(beneficiary)?;
        results.push(tax_position(
            &table,
            position,
            contract_value,
            base_990i,
            base_757b,
            input.premiums_after_age70,
        ));
    }

    let total_transmitted = contract_value;
    let total_tax: f64 = results.iter().map(|r| r.total_tax).sum();
    let total_net: f64 = results.iter().map(|r| r.net_amount).sum();
    let global_effective_rate_percent = if total_transmitted > 0.0 {
        total_tax / total_transmitted * 100.0
    } else {
        0.0
    };

    let (optimizations, alerts) = advisories(
        input,
        &results,
        global_effective_rate_percent,
    );

    Ok(DecesResult {
        beneficiaries: results,
        total_transmitted,
        total_tax,
        total_net,
        global_effective_rate_percent,
        ratio_after70_percent: ratio_after70 * 100.0,
        base_990i,
        base_757b,
        optimizations,
        alerts,
    })
}

/// Resolve a beneficiary row into the position actually taxed. For usufruct
/// rows the taxed party is the usufructuary; for bare-ownership rows the
/// beneficiary, at the complement of the art. 669 scale.
fn resolve_position(beneficiary: &Beneficiary) -> Result<Position, ValidationError> {
    let declared_share = beneficiary.share_of_contract_percent / 100.0;

    match beneficiary.clause_kind {
        ClauseKind::FullOwnership => Ok(Position {
            name: beneficiary.name.clone(),
            kinship: beneficiary.kinship,
            clause_kind: ClauseKind::FullOwnership,
            effective_share: declared_share,
            dismember_fraction: None,
            usufruct_percent: None,
            bare_ownership_percent: None,
            usufructuary: None,
        }),
        ClauseKind::Usufruct | ClauseKind::BareOwnership => {
            let usufructuary = beneficiary.usufructuary.as_ref().ok_or_else(|| {
                ValidationError::new(
                    "a usufructuary must be defined for a dismembered clause",
                )
            })?;

            let scale = UsufructScale;
            let usufruct_percent = scale.usufruct_percent(usufructuary.age);
            let bare_ownership_percent = scale.bare_ownership_percent(usufructuary.age);

            let (name, kinship, fraction) = match beneficiary.clause_kind {
                ClauseKind::Usufruct => (
                    format!("{} (usufructuary)", usufructuary.name),
                    usufructuary.kinship,
                    usufruct_percent / 100.0,
                ),
                _ => (
                    format!("{} (bare owner)", beneficiary.name),
                    beneficiary.kinship,
                    bare_ownership_percent / 100.0,
                ),
            };

            Ok(Position {
                name,
                kinship,
                clause_kind: beneficiary.clause_kind,
                effective_share: declared_share * fraction,
                dismember_fraction: Some(fraction),
                usufruct_percent: Some(usufruct_percent),
                bare_ownership_percent: Some(bare_ownership_percent),
                usufructuary: Some(usufructuary.name.clone()),
            })
        }
    }
}

/// Apply both regimes to a resolved position
fn tax_position(
    table: &KinshipTaxTable,
    position: Position,
    contract_value: f64,
    base_990i: f64,
    base_757b: f64,
    premiums_after_age70: f64,
) -> BeneficiaryTaxResult {
    let tepa_exempt = table.is_fully_exempt(position.kinship);

    let gross_amount = contract_value * position.effective_share;
    let share_990i = position.effective_share * base_990i;
    let share_757b = position.effective_share * base_757b;

    // Article 990 I: per-beneficiary allowance, scaled by the dismemberment
    // fraction when the position is an usufruct/bare-ownership split
    let (allowance_990i, taxable_990i, tax_990i) = if tepa_exempt {
        (0.0, 0.0, 0.0)
    } else {
        let scaled = ALLOWANCE_990I * position.dismember_fraction.unwrap_or(1.0);
        let allowance = scaled.min(share_990i);
        let taxable = (share_990i - allowance).max(0.0);
        (allowance, taxable, tax_990i_amount(taxable))
    };

    // Article 757 B: taxes the post-70 premium amount only, with the global
    // 30,500 EUR allowance prorated by the effective share
    let (allowance_757b, taxable_757b, tax_757b) =
        if tepa_exempt || premiums_after_age70 <= 0.0 {
            (0.0, 0.0, 0.0)
        } else {
            let base = premiums_after_age70 * position.effective_share;
            let allowance = (ALLOWANCE_757B_GLOBAL * position.effective_share).min(base);
            let taxable = (base - allowance).max(0.0);
            (allowance, taxable, table.tax_on(position.kinship, taxable))
        };

    let total_tax = tax_990i + tax_757b;
    let net_amount = gross_amount - total_tax;
    let effective_rate_percent = if gross_amount > 0.0 {
        total_tax / gross_amount * 100.0
    } else {
        0.0
    };

    BeneficiaryTaxResult {
        name: position.name,
        kinship: position.kinship,
        clause_kind: position.clause_kind,
        gross_amount,
        share_990i,
        share_757b,
        allowance_990i,
        allowance_757b,
        taxable_990i,
        taxable_757b,
        tax_990i,
        tax_757b,
        total_tax,
        net_amount,
        effective_rate_percent,
        tepa_exempt,
        usufruct_percent: position.usufruct_percent,
        bare_ownership_percent: position.bare_ownership_percent,
        usufructuary: position.usufructuary,
    }
}

/// 990 I progressive formula: 20% up to 700,000 EUR of taxable base,
/// 31.25% beyond
fn tax_990i_amount(taxable: f64) -> f64 {
    if taxable <= 0.0 {
        0.0
    } else if taxable <= THRESHOLD_990I {
        taxable * RATE_990I_LOW
    } else {
        THRESHOLD_990I * RATE_990I_LOW + (taxable - THRESHOLD_990I) * RATE_990I_HIGH
    }
}

fn advisories(
    input: &ContractDecesInput,
    results: &[BeneficiaryTaxResult],
    global_rate: f64,
) -> (Vec<String>, Vec<String>) {
    let mut optimizations = Vec::new();
    let mut alerts = Vec::new();

    let exempt_count = results.iter().filter(|r| r.tepa_exempt).count();
    if exempt_count > 0 {
        optimizations.push(format!(
            "{} beneficiary(ies) fully exempt under Loi Tepa (spouse/PACS).",
            exempt_count
        ));
    }

    let dismembered: Vec<_> = results
        .iter()
        .filter(|r| r.clause_kind != ClauseKind::FullOwnership)
        .collect();
    if !dismembered.is_empty() {
        optimizations.push(
            "Dismembered clause applied: allowances prorated to the \
             usufruct/bare-ownership shares per the statutory scale."
                .to_string(),
        );
        let with_990i_base = dismembered.iter().filter(|r| r.share_990i > 0.0).count();
        if with_990i_base > 0 {
            optimizations.push(format!(
                "Dismembered positions: 990 I allowances applied proportionally \
                 to the shares received ({} beneficiary(ies) concerned).",
                with_990i_base
            ));
        }
    }

    if input.premiums_after_age70 > ALLOWANCE_757B_GLOBAL {
        let excess = input.premiums_after_age70 - ALLOWANCE_757B_GLOBAL;
        alerts.push(format!(
            "Premiums paid after age 70 ({:.0} EUR) exceed the {:.0} EUR global \
             allowance by {:.0} EUR. Favor contributions before age 70.",
            input.premiums_after_age70, ALLOWANCE_757B_GLOBAL, excess
        ));
    }

    if results.iter().any(|r| r.kinship == Kinship::Other) {
        alerts.push(
            "Beneficiaries without legal kinship (concubinage) are taxed at \
             60% with no Tepa exemption. Consider PACS or marriage."
                .to_string(),
        );
    }

    if global_rate > 20.0 {
        alerts.push(format!(
            "High global effective rate ({:.1}%). Consider optimization strategies.",
            global_rate
        ));
    }

    let has_spouse = input
        .beneficiaries
        .iter()
        .any(|b| b.kinship == Kinship::Spouse);
    if input.clause_type == ClauseType::Standard && has_spouse {
        optimizations.push(
            "Standard clause with a spouse beneficiary: a custom clause review \
             is worthwhile for blended-family situations."
                .to_string(),
        );
    }

    (optimizations, alerts)
}

fn validate(input: &ContractDecesInput) -> Result<(), ValidationError> {
    if input.contract_value_at_death <= 0.0 {
        return Err(ValidationError::new(
            "contract value at death must be positive",
        ));
    }
    if input.premiums_before_age70 < 0.0 || input.premiums_after_age70 < 0.0 {
        return Err(ValidationError::new("premium amounts must be non-negative"));
    }
    if input.premiums_before_age70 + input.premiums_after_age70 > input.contract_value_at_death
    {
        return Err(ValidationError::new(
            "total premiums cannot exceed the contract value at death",
        ));
    }
    for beneficiary in &input.beneficiaries {
        if !(0.0..=100.0).contains(&beneficiary.share_of_contract_percent) {
            return Err(ValidationError::new(
                "beneficiary share must be between 0 and 100",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deces::types::Usufructuary;
    use approx::assert_relative_eq;

    fn full_owner(name: &str, kinship: Kinship, share: f64) -> Beneficiary {
        Beneficiary {
            name: name.to_string(),
            kinship,
            age: 45,
            share_of_contract_percent: share,
            clause_kind: ClauseKind::FullOwnership,
            usufructuary: None,
        }
    }

    fn contract(beneficiaries: Vec<Beneficiary>) -> ContractDecesInput {
        ContractDecesInput {
            contract_value_at_death: 500_000.0,
            premiums_before_age70: 200_000.0,
            premiums_after_age70: 0.0,
            clause_type: ClauseType::Custom,
            beneficiaries,
        }
    }

    #[test]
    fn test_spouse_fully_exempt() {
        let input = contract(vec![full_owner("Claire", Kinship::Spouse, 100.0)]);
        let result = compute_death_benefit_tax(&input).unwrap();

        assert_eq!(result.total_tax, 0.0);
        assert_relative_eq!(result.total_net, 500_000.0);
        assert!(result.beneficiaries[0].tepa_exempt);
        assert!(result.optimizations[0].contains("Loi Tepa"));
    }

    #[test]
    fn test_single_child_990i() {
        let input = contract(vec![full_owner("Paul", Kinship::Child, 100.0)]);
        let result = compute_death_benefit_tax(&input).unwrap();

        // ratio_after70 = 0, so the whole value sits under 990 I
        assert_relative_eq!(result.base_990i, 500_000.0);
        let row = &result.beneficiaries[0];
        assert_relative_eq!(row.allowance_990i, 152_500.0);
        assert_relative_eq!(row.taxable_990i, 347_500.0);
        assert_relative_eq!(row.tax_990i, 69_500.0);
        assert_relative_eq!(row.net_amount, 430_500.0);
    }

    #[test]
    fn test_990i_high_bracket() {
        let mut input = contract(vec![full_owner("Paul", Kinship::Child, 100.0)]);
        input.contract_value_at_death = 2_000_000.0;
        input.premiums_before_age70 = 1_000_000.0;
        let result = compute_death_benefit_tax(&input).unwrap();

        let row = &result.beneficiaries[0];
        let taxable = 2_000_000.0 - 152_500.0;
        let expected = 700_000.0 * 0.20 + (taxable - 700_000.0) * 0.3125;
        assert_relative_eq!(row.tax_990i, expected);
    }

    #[test]
    fn test_each_beneficiary_gets_own_990i_allowance() {
        let input = contract(vec![
            full_owner("Paul", Kinship::Child, 50.0),
            full_owner("Anne", Kinship::Child, 50.0),
        ]);
        let result = compute_death_benefit_tax(&input).unwrap();

        for row in &result.beneficiaries {
            assert_relative_eq!(row.share_990i, 250_000.0);
            assert_relative_eq!(row.allowance_990i, 152_500.0);
            assert_relative_eq!(row.tax_990i, (250_000.0 - 152_500.0) * 0.20);
        }
        // Gross amounts reassemble the full contract
        let gross: f64 = result.beneficiaries.iter().map(|r| r.gross_amount).sum();
        assert_relative_eq!(gross, 500_000.0);
    }

    #[test]
    fn test_757b_proportional_split_and_global_allowance() {
        let input = ContractDecesInput {
            contract_value_at_death: 400_000.0,
            premiums_before_age70: 100_000.0,
            premiums_after_age70: 100_000.0,
            clause_type: ClauseType::Custom,
            beneficiaries: vec![
                full_owner("Paul", Kinship::Child, 50.0),
                full_owner("Anne", Kinship::Child, 50.0),
            ],
        };
        let result = compute_death_benefit_tax(&input).unwrap();

        // Half the premiums are post-70, so half the contract sits under 757 B
        assert_relative_eq!(result.ratio_after70_percent, 50.0);
        assert_relative_eq!(result.base_757b, 200_000.0);
        assert_relative_eq!(result.base_990i, 200_000.0);

        for row in &result.beneficiaries {
            // 757 B taxes the post-70 premiums only: 50,000 each, allowance
            // 30,500 prorated at 50% = 15,250, remainder at the child 20% rate
            assert_relative_eq!(row.allowance_757b, 15_250.0);
            assert_relative_eq!(row.taxable_757b, 34_750.0);
            assert_relative_eq!(row.tax_757b, 6_950.0);
        }
        // Excess over the global allowance triggers the alert
        assert!(result
            .alerts
            .iter()
            .any(|a| a.contains("exceed the 30500 EUR global allowance")));
    }

    #[test]
    fn test_dismembered_pair_splits_by_age_scale() {
        let usufructuary = Usufructuary {
            name: "Claire".to_string(),
            age: 65,
            kinship: Kinship::Spouse,
        };
        let input = ContractDecesInput {
            contract_value_at_death: 500_000.0,
            premiums_before_age70: 300_000.0,
            premiums_after_age70: 0.0,
            clause_type: ClauseType::Dismembered,
            beneficiaries: vec![
                Beneficiary {
                    name: "Claire".to_string(),
                    kinship: Kinship::Spouse,
                    age: 65,
                    share_of_contract_percent: 100.0,
                    clause_kind: ClauseKind::Usufruct,
                    usufructuary: Some(usufructuary.clone()),
                },
                Beneficiary {
                    name: "Paul".to_string(),
                    kinship: Kinship::Child,
                    age: 40,
                    share_of_contract_percent: 100.0,
                    clause_kind: ClauseKind::BareOwnership,
                    usufructuary: Some(usufructuary),
                },
            ],
        };
        let result = compute_death_benefit_tax(&input).unwrap();

        // Age 65 usufructuary: 40% usufruct, 60% bare ownership
        let usufruct_row = &result.beneficiaries[0];
        let bare_row = &result.beneficiaries[1];
        assert_relative_eq!(usufruct_row.gross_amount, 200_000.0);
        assert_relative_eq!(bare_row.gross_amount, 300_000.0);
        assert_relative_eq!(
            usufruct_row.gross_amount + bare_row.gross_amount,
            500_000.0
        );

        // Spouse usufructuary exempt; bare owner's allowance scaled to 60%
        assert!(usufruct_row.tepa_exempt);
        assert_eq!(usufruct_row.total_tax, 0.0);
        assert_relative_eq!(bare_row.allowance_990i, 152_500.0 * 0.60);
        assert_relative_eq!(
            bare_row.tax_990i,
            (300_000.0 - 152_500.0 * 0.60) * 0.20
        );
        assert_eq!(bare_row.usufructuary.as_deref(), Some("Claire"));
        assert!(result
            .optimizations
            .iter()
            .any(|o| o.contains("Dismembered clause")));
    }

    #[test]
    fn test_missing_usufructuary_rejected() {
        let input = contract(vec![Beneficiary {
            name: "Paul".to_string(),
            kinship: Kinship::Child,
            age: 40,
            share_of_contract_percent: 100.0,
            clause_kind: ClauseKind::BareOwnership,
            usufructuary: None,
        }]);
        let err = compute_death_benefit_tax(&input).unwrap_err();
        assert!(err.message().contains("usufructuary"));
    }

    #[test]
    fn test_concubinage_alert_and_rate() {
        let input = contract(vec![full_owner("Dominique", Kinship::Other, 100.0)]);
        let result = compute_death_benefit_tax(&input).unwrap();

        let row = &result.beneficiaries[0];
        assert_relative_eq!(row.tax_990i, (500_000.0 - 152_500.0) * 0.60);
        assert!(result.alerts.iter().any(|a| a.contains("concubinage")));
        assert!(result
            .alerts
            .iter()
            .any(|a| a.contains("High global effective rate")));
    }

    #[test]
    fn test_standard_clause_with_spouse_suggestion() {
        let mut input = contract(vec![
            full_owner("Claire", Kinship::Spouse, 60.0),
            full_owner("Paul", Kinship::Child, 40.0),
        ]);
        input.clause_type = ClauseType::Standard;
        let result = compute_death_benefit_tax(&input).unwrap();

        assert!(result
            .optimizations
            .iter()
            .any(|o| o.contains("custom clause review")));
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        let mut input = contract(vec![full_owner("Paul", Kinship::Child, 100.0)]);
        input.contract_value_at_death = 0.0;
        input.premiums_before_age70 = 0.0;
        assert!(compute_death_benefit_tax(&input).is_err());

        let mut input = contract(vec![full_owner("Paul", Kinship::Child, 100.0)]);
        input.premiums_before_age70 = 600_000.0;
        assert!(compute_death_benefit_tax(&input).is_err());

        let mut input = contract(vec![full_owner("Paul", Kinship::Child, 100.0)]);
        input.premiums_after_age70 = -1.0;
        assert!(compute_death_benefit_tax(&input).is_err());
    }

    #[test]
    fn test_idempotent() {
        let input = contract(vec![
            full_owner("Claire", Kinship::Spouse, 50.0),
            full_owner("Paul", Kinship::Child, 50.0),
        ]);
        let first = compute_death_benefit_tax(&input).unwrap();
        let second = compute_death_benefit_tax(&input).unwrap();
        assert_eq!(first, second);
    }
}
