//! Shipping cost allocation.
//!
//! This module decides free-vs-paid shipping per shipping group and splits
//! the flat fee across a paying group's orders.

use rust_decimal::Decimal;

use crate::models::{AuditStep, ParticipantOrder, ShippedOrder};

use super::shipping_groups::group_by_shipping_target;

/// The result of a shipping allocation, including annotated orders and
/// one audit step per shipping group.
#[derive(Debug, Clone)]
pub struct ShippingAllocationResult {
    /// The input orders, in input order, annotated with cost and note.
    pub orders: Vec<ShippedOrder>,
    /// Sum of all allocated shipping costs.
    pub shipping_total: Decimal,
    /// One audit step per shipping group, in group order.
    pub audit_steps: Vec<AuditStep>,
}

/// Allocates shipping costs across participant orders.
///
/// Orders are partitioned by shipping target. A group whose subtotals sum
/// to at least `free_threshold` (inclusive) ships free; otherwise every
/// order in the group is charged `flat_fee / |group|` rounded to 2 decimal
/// places (banker's rounding, matching the source system). The rounded
/// per-order amounts may sum to a few cents more or less than the flat
/// fee; that drift is accepted, documented behavior and is not
/// redistributed.
///
/// The function is pure and idempotent: the same input always yields the
/// same costs and notes, and the output preserves the input ordering.
///
/// Callers must filter out orders with no line items before invocation and
/// are responsible for supplying non-negative `free_threshold`/`flat_fee`
/// (enforced at configuration load).
///
/// # Arguments
///
/// * `orders` - The participant orders, each with non-empty line items
/// * `free_threshold` - Group total from which shipping is free (inclusive)
/// * `flat_fee` - The fee split across a paying group's orders
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use party_engine::calculation::allocate_shipping;
/// use party_engine::models::{LineItem, ParticipantOrder, ParticipantRole};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let orders = vec![ParticipantOrder {
///     participant_id: "CUST-001".to_string(),
///     role: ParticipantRole::Guest,
///     guest_index: Some(1),
///     shipping_target_id: "CUST-001".to_string(),
///     line_items: vec![LineItem::new("FW-100", Decimal::from(1), Decimal::from(50))],
/// }];
///
/// let result = allocate_shipping(&orders, Decimal::from(200), Decimal::from(7), 1);
/// assert_eq!(result.orders[0].shipping_cost, Decimal::from(7));
/// ```
pub fn allocate_shipping(
    orders: &[ParticipantOrder],
    free_threshold: Decimal,
    flat_fee: Decimal,
    step_number: u32,
) -> ShippingAllocationResult {
    let groups = group_by_shipping_target(orders);

    // Per-order cost and note, indexed like the input.
    let mut costs: Vec<(Decimal, String)> = vec![(Decimal::ZERO, String::new()); orders.len()];
    let mut audit_steps = Vec::with_capacity(groups.len());
    let mut step = step_number;

    for group in &groups {
        let member_count = group.member_indices.len();
        let (per_order_cost, note) = if group.group_total >= free_threshold {
            (
                Decimal::ZERO,
                format!(
                    "Free shipping (group total {:.2} >= {:.2})",
                    group.group_total, free_threshold
                ),
            )
        } else {
            let cost = (flat_fee / Decimal::from(member_count)).round_dp(2);
            (
                cost,
                format!(
                    "Shipping fee split: {} order(s) at {:.2} each (flat fee {:.2}, group total {:.2} < {:.2})",
                    member_count, cost, flat_fee, group.group_total, free_threshold
                ),
            )
        };

        for &index in &group.member_indices {
            costs[index] = (per_order_cost, note.clone());
        }

        audit_steps.push(AuditStep {
            step_number: step,
            rule_id: "shipping_allocation".to_string(),
            rule_name: "Shipping Cost Allocation".to_string(),
            input: serde_json::json!({
                "shipping_target_id": group.shipping_target_id,
                "member_count": member_count,
                "group_total": group.group_total.normalize().to_string(),
                "free_threshold": free_threshold.normalize().to_string(),
                "flat_fee": flat_fee.normalize().to_string()
            }),
            output: serde_json::json!({
                "free": per_order_cost.is_zero(),
                "per_order_cost": per_order_cost.normalize().to_string()
            }),
            reasoning: note.clone(),
        });
        step += 1;
    }

    let mut shipping_total = Decimal::ZERO;
    let shipped: Vec<ShippedOrder> = orders
        .iter()
        .zip(costs)
        .map(|(order, (shipping_cost, shipping_note))| {
            shipping_total += shipping_cost;
            ShippedOrder {
                order: order.clone(),
                shipping_cost,
                shipping_note,
            }
        })
        .collect();

    ShippingAllocationResult {
        orders: shipped,
        shipping_total,
        audit_steps,
    }
}
