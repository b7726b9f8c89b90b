//! Shipping group partitioning.
//!
//! Orders that ship to the same participant's address form one shipping
//! group; free-shipping eligibility and the flat fee split are evaluated
//! per group, not per order.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::ParticipantOrder;

/// A set of orders sharing one shipping target.
///
/// Groups hold indices into the order slice they were built from, so the
/// original ordering is preserved for output.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingGroup {
    /// The shipping target all member orders ship to.
    pub shipping_target_id: String,
    /// Indices of the member orders in the input slice.
    pub member_indices: Vec<usize>,
    /// Sum of member subtotals.
    pub group_total: Decimal,
}

/// Partitions orders into shipping groups keyed by `shipping_target_id`.
///
/// The grouping is stable: groups appear in order of the first occurrence
/// of their target, and members keep their input order. Every order lands
/// in exactly one group, so the groups partition the input exactly.
///
/// # Examples
///
/// ```
/// use party_engine::calculation::group_by_shipping_target;
/// use party_engine::models::{LineItem, ParticipantOrder, ParticipantRole};
/// use rust_decimal::Decimal;
///
/// let orders = vec![
///     ParticipantOrder {
///         participant_id: "CUST-001".to_string(),
///         role: ParticipantRole::Guest,
///         guest_index: Some(1),
///         shipping_target_id: "HOST-001".to_string(),
///         line_items: vec![LineItem::new("FW-100", Decimal::from(1), Decimal::from(30))],
///     },
///     ParticipantOrder {
///         participant_id: "CUST-002".to_string(),
///         role: ParticipantRole::Guest,
///         guest_index: Some(2),
///         shipping_target_id: "CUST-002".to_string(),
///         line_items: vec![LineItem::new("FW-200", Decimal::from(1), Decimal::from(45))],
///     },
/// ];
///
/// let groups = group_by_shipping_target(&orders);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].shipping_target_id, "HOST-001");
/// ```
pub fn group_by_shipping_target(orders: &[ParticipantOrder]) -> Vec<ShippingGroup> {
    let mut groups: Vec<ShippingGroup> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (index, order) in orders.iter().enumerate() {
        match positions.get(order.shipping_target_id.as_str()) {
            Some(&position) => {
                let group = &mut groups[position];
                group.member_indices.push(index);
                group.group_total += order.subtotal();
            }
            None => {
                positions.insert(order.shipping_target_id.as_str(), groups.len());
                groups.push(ShippingGroup {
                    shipping_target_id: order.shipping_target_id.clone(),
                    member_indices: vec![index],
                    group_total: order.subtotal(),
                });
            }
        }
    }

    groups
}
