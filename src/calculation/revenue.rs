//! Total presentation revenue calculation.
//!
//! This module sums every participant's effective line items into the
//! party's total revenue, the input to the voucher tier lookup.

use rust_decimal::Decimal;

use crate::models::{AuditStep, LineItem, Party};

/// The result of a revenue calculation, including the total and audit step.
#[derive(Debug, Clone)]
pub struct RevenueResult {
    /// The total presentation revenue across host and guests.
    pub total_revenue: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the party's total presentation revenue.
///
/// Sums `quantity * rate` over every effective line item of the host and
/// all guests. Blank rows and zero-quantity rows are ignored.
///
/// When `skip_recalculation` is true, the party's cached total from a
/// previous run is used instead of summing the tables again. This is an
/// explicit parameter rather than an ambient document flag so callers can
/// see exactly which runs reuse stale totals.
///
/// # Arguments
///
/// * `party` - The party document to sum
/// * `skip_recalculation` - Reuse `party.cached_total_revenue` when set
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use party_engine::calculation::calculate_total_revenue;
/// use party_engine::models::{LineItem, Party, PartyStatus};
/// use rust_decimal::Decimal;
///
/// let party = Party {
///     id: "PARTY-2025-0001".to_string(),
///     host_id: "HOST-001".to_string(),
///     sales_partner: None,
///     status: PartyStatus::Products,
///     host_shipping_target: None,
///     host_selection: vec![LineItem::new("FW-100", Decimal::from(2), Decimal::from(30))],
///     guests: vec![],
///     guest_selections: vec![],
///     cached_total_revenue: None,
/// };
///
/// let result = calculate_total_revenue(&party, false, 1);
/// assert_eq!(result.total_revenue, Decimal::from(60));
/// ```
pub fn calculate_total_revenue(
    party: &Party,
    skip_recalculation: bool,
    step_number: u32,
) -> RevenueResult {
    if skip_recalculation {
        let total_revenue = party.cached_total_revenue.unwrap_or(Decimal::ZERO);

        let audit_step = AuditStep {
            step_number,
            rule_id: "total_revenue".to_string(),
            rule_name: "Total Presentation Revenue".to_string(),
            input: serde_json::json!({
                "party_id": party.id,
                "skip_recalculation": true,
                "cached_total_revenue": party
                    .cached_total_revenue
                    .map(|total| total.normalize().to_string())
            }),
            output: serde_json::json!({
                "total_revenue": total_revenue.normalize().to_string(),
                "source": "cached"
            }),
            reasoning: format!(
                "Recalculation skipped, using cached total {}",
                total_revenue.normalize()
            ),
        };

        return RevenueResult {
            total_revenue,
            audit_step,
        };
    }

    let host_total: Decimal = sum_effective(&party.host_selection);
    let guest_total: Decimal = party
        .guest_selections
        .iter()
        .map(|selection| sum_effective(selection))
        .sum();
    let total_revenue = host_total + guest_total;

    let audit_step = AuditStep {
        step_number,
        rule_id: "total_revenue".to_string(),
        rule_name: "Total Presentation Revenue".to_string(),
        input: serde_json::json!({
            "party_id": party.id,
            "skip_recalculation": false,
            "guest_count": party.guests.len()
        }),
        output: serde_json::json!({
            "host_total": host_total.normalize().to_string(),
            "guest_total": guest_total.normalize().to_string(),
            "total_revenue": total_revenue.normalize().to_string(),
            "source": "recalculated"
        }),
        reasoning: format!(
            "Host {} + guests {} = {}",
            host_total.normalize(),
            guest_total.normalize(),
            total_revenue.normalize()
        ),
    };

    RevenueResult {
        total_revenue,
        audit_step,
    }
}

fn sum_effective(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .filter(|item| item.is_effective())
        .map(LineItem::value)
        .sum()
}
