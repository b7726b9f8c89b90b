//! Participant order collection.
//!
//! Builds the transient per-participant orders that feed shipping
//! allocation: host first, then guests in list order, each with its
//! resolved shipping target and only its effective line items.

use crate::models::{LineItem, ParticipantOrder, ParticipantRole, Party};

/// Collects one [`ParticipantOrder`] per participant with effective items.
///
/// The host's order comes first, then guest orders in guest list order.
/// Each order's shipping target resolves to the participant's configured
/// target, falling back to the participant themselves. Participants whose
/// selection holds no effective items are skipped entirely — they are not
/// part of any shipping group.
///
/// # Examples
///
/// ```
/// use party_engine::orders::collect_participant_orders;
/// use party_engine::models::{LineItem, Party, PartyStatus};
/// use rust_decimal::Decimal;
///
/// let party = Party {
///     id: "PARTY-2025-0001".to_string(),
///     host_id: "HOST-001".to_string(),
///     sales_partner: None,
///     status: PartyStatus::Products,
///     host_shipping_target: None,
///     host_selection: vec![LineItem::new("FW-100", Decimal::from(1), Decimal::from(30))],
///     guests: vec![],
///     guest_selections: vec![],
///     cached_total_revenue: None,
/// };
///
/// let orders = collect_participant_orders(&party);
/// assert_eq!(orders.len(), 1);
/// assert_eq!(orders[0].shipping_target_id, "HOST-001");
/// ```
pub fn collect_participant_orders(party: &Party) -> Vec<ParticipantOrder> {
    let mut orders = Vec::new();

    let host_items = effective_items(&party.host_selection);
    if !host_items.is_empty() {
        let shipping_target_id = party
            .host_shipping_target
            .clone()
            .filter(|target| !target.is_empty())
            .unwrap_or_else(|| party.host_id.clone());

        orders.push(ParticipantOrder {
            participant_id: party.host_id.clone(),
            role: ParticipantRole::Host,
            guest_index: None,
            shipping_target_id,
            line_items: host_items,
        });
    }

    for (index, guest) in party.guests.iter().enumerate() {
        if guest.customer_id.is_empty() {
            continue;
        }

        let items = effective_items(party.guest_selection(index));
        if items.is_empty() {
            continue;
        }

        let shipping_target_id = guest
            .shipping_target_id
            .clone()
            .filter(|target| !target.is_empty())
            .unwrap_or_else(|| guest.customer_id.clone());

        orders.push(ParticipantOrder {
            participant_id: guest.customer_id.clone(),
            role: ParticipantRole::Guest,
            guest_index: Some(index as u32 + 1),
            shipping_target_id,
            line_items: items,
        });
    }

    orders
}

fn effective_items(items: &[LineItem]) -> Vec<LineItem> {
    items
        .iter()
        .filter(|item| item.is_effective())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Guest, PartyStatus};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_party() -> Party {
        Party {
            id: "PARTY-2025-0001".to_string(),
            host_id: "HOST-001".to_string(),
            sales_partner: None,
            status: PartyStatus::Products,
            host_shipping_target: None,
            host_selection: vec![LineItem::new("FW-100", dec("1"), dec("30"))],
            guests: vec![
                Guest {
                    customer_id: "CUST-001".to_string(),
                    shipping_target_id: None,
                },
                Guest {
                    customer_id: "CUST-002".to_string(),
                    shipping_target_id: Some("HOST-001".to_string()),
                },
            ],
            guest_selections: vec![
                vec![LineItem::new("FW-200", dec("2"), dec("45.50"))],
                vec![LineItem::new("FW-300", dec("1"), dec("19.90"))],
            ],
            cached_total_revenue: None,
        }
    }

    /// OC-001: host order comes first
    #[test]
    fn test_host_order_first() {
        let orders = collect_participant_orders(&make_party());

        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].role, ParticipantRole::Host);
        assert_eq!(orders[0].participant_id, "HOST-001");
        assert_eq!(orders[0].guest_index, None);
    }

    /// OC-002: shipping target falls back to the participant
    #[test]
    fn test_shipping_target_fallback() {
        let orders = collect_participant_orders(&make_party());

        assert_eq!(orders[0].shipping_target_id, "HOST-001");
        assert_eq!(orders[1].shipping_target_id, "CUST-001");
    }

    /// OC-003: an explicit shipping target wins
    #[test]
    fn test_explicit_shipping_target() {
        let orders = collect_participant_orders(&make_party());

        assert_eq!(orders[2].participant_id, "CUST-002");
        assert_eq!(orders[2].shipping_target_id, "HOST-001");
    }

    /// OC-004: participants without effective items are skipped
    #[test]
    fn test_empty_selections_are_skipped() {
        let mut party = make_party();
        party.guest_selections[0] = vec![LineItem::new("FW-200", dec("0"), dec("45.50"))];

        let orders = collect_participant_orders(&party);

        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.participant_id != "CUST-001"));
    }

    /// OC-005: host shipping override is honored
    #[test]
    fn test_host_shipping_override() {
        let mut party = make_party();
        party.host_shipping_target = Some("CUST-002".to_string());

        let orders = collect_participant_orders(&party);
        assert_eq!(orders[0].shipping_target_id, "CUST-002");
    }

    /// OC-006: guest indices are 1-based positions in the guest list
    #[test]
    fn test_guest_indices_are_one_based() {
        let orders = collect_participant_orders(&make_party());
        assert_eq!(orders[1].guest_index, Some(1));
        assert_eq!(orders[2].guest_index, Some(2));
    }

    #[test]
    fn test_blank_rows_are_dropped_from_orders() {
        let mut party = make_party();
        party.host_selection.push(LineItem::new("", dec("1"), dec("99")));

        let orders = collect_participant_orders(&party);
        assert_eq!(orders[0].line_items.len(), 1);
    }

    #[test]
    fn test_unnamed_guest_rows_are_skipped() {
        let mut party = make_party();
        party.guests.push(Guest {
            customer_id: String::new(),
            shipping_target_id: None,
        });
        party
            .guest_selections
            .push(vec![LineItem::new("FW-400", dec("1"), dec("10"))]);

        let orders = collect_participant_orders(&party);
        assert_eq!(orders.len(), 3);
    }

    #[test]
    fn test_empty_shipping_target_string_falls_back() {
        let mut party = make_party();
        party.guests[0].shipping_target_id = Some(String::new());

        let orders = collect_participant_orders(&party);
        assert_eq!(orders[1].shipping_target_id, "CUST-001");
    }
}
