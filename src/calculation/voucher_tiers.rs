//! Voucher tier lookup functionality.
//!
//! This module provides the step-function lookup that turns a party's total
//! presentation revenue into the host's voucher amount.

use rust_decimal::Decimal;

use crate::config::VoucherTable;
use crate::models::AuditStep;

/// The result of a voucher tier lookup, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct VoucherLookupResult {
    /// The voucher amount the host is entitled to.
    pub amount: Decimal,
    /// The minimum revenue of the tier that matched.
    pub tier_minimum: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Computes the host voucher amount for a total presentation revenue.
///
/// The tier table is evaluated as a monotonic step function: the table is
/// walked in ascending order and the last tier whose `minimum_revenue` is
/// less than or equal to `total_revenue` wins. A revenue exactly on a tier
/// boundary qualifies for that tier (inclusive comparison). The amount is
/// never interpolated between tiers and never exceeds the largest entry.
///
/// # Arguments
///
/// * `table` - The validated voucher tier table
/// * `total_revenue` - Non-negative total revenue across all participants
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use party_engine::calculation::lookup_voucher;
/// use party_engine::config::VoucherTable;
/// use rust_decimal::Decimal;
///
/// let table = VoucherTable::standard();
/// let result = lookup_voucher(&table, Decimal::from(700), 1);
/// assert_eq!(result.amount, Decimal::from(60));
/// ```
pub fn lookup_voucher(
    table: &VoucherTable,
    total_revenue: Decimal,
    step_number: u32,
) -> VoucherLookupResult {
    let mut amount = Decimal::ZERO;
    let mut tier_minimum = Decimal::ZERO;

    for tier in table.tiers() {
        if total_revenue >= tier.minimum_revenue {
            amount = tier.voucher_amount;
            tier_minimum = tier.minimum_revenue;
        } else {
            break;
        }
    }

    let reasoning = if amount > Decimal::ZERO {
        format!(
            "Revenue {} reaches tier {} -> voucher {}",
            total_revenue.normalize(),
            tier_minimum.normalize(),
            amount.normalize()
        )
    } else {
        format!(
            "Revenue {} is below the first paying tier -> no voucher",
            total_revenue.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "voucher_tier_lookup".to_string(),
        rule_name: "Voucher Tier Lookup".to_string(),
        input: serde_json::json!({
            "total_revenue": total_revenue.normalize().to_string(),
            "tier_count": table.tiers().len()
        }),
        output: serde_json::json!({
            "voucher_amount": amount.normalize().to_string(),
            "tier_minimum": tier_minimum.normalize().to_string()
        }),
        reasoning,
    };

    VoucherLookupResult {
        amount,
        tier_minimum,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn amount_for(revenue: &str) -> Decimal {
        lookup_voucher(&VoucherTable::standard(), dec(revenue), 1).amount
    }

    /// VT-001: zero revenue earns no voucher
    #[test]
    fn test_zero_revenue_earns_nothing() {
        assert_eq!(amount_for("0"), dec("0"));
    }

    /// VT-002: just below the first paying tier
    #[test]
    fn test_349_99_earns_nothing() {
        assert_eq!(amount_for("349.99"), dec("0"));
    }

    /// VT-003: tier boundary is inclusive
    #[test]
    fn test_350_earns_30() {
        assert_eq!(amount_for("350"), dec("30"));
    }

    /// VT-004: values between tiers stay on the lower tier
    #[test]
    fn test_599_99_earns_30() {
        assert_eq!(amount_for("599.99"), dec("30"));
    }

    #[test]
    fn test_600_earns_60() {
        assert_eq!(amount_for("600"), dec("60"));
    }

    #[test]
    fn test_850_earns_95() {
        assert_eq!(amount_for("850"), dec("95"));
    }

    /// VT-005: top tier boundary
    #[test]
    fn test_1100_earns_130() {
        assert_eq!(amount_for("1100"), dec("130"));
    }

    /// VT-006: amounts are capped at the largest table entry
    #[test]
    fn test_5000_earns_130() {
        assert_eq!(amount_for("5000"), dec("130"));
    }

    #[test]
    fn test_amount_is_never_interpolated() {
        // Halfway between the 350 and 600 tiers still pays the 350 amount.
        assert_eq!(amount_for("475"), dec("30"));
    }

    #[test]
    fn test_audit_step_records_matched_tier() {
        let result = lookup_voucher(&VoucherTable::standard(), dec("700"), 3);

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "voucher_tier_lookup");
        assert_eq!(result.tier_minimum, dec("600"));
        assert_eq!(
            result.audit_step.output["voucher_amount"].as_str().unwrap(),
            "60"
        );
        assert!(result.audit_step.reasoning.contains("700"));
    }

    #[test]
    fn test_audit_step_explains_no_voucher() {
        let result = lookup_voucher(&VoucherTable::standard(), dec("120"), 1);

        assert_eq!(result.amount, dec("0"));
        assert!(result.audit_step.reasoning.contains("no voucher"));
    }
}
