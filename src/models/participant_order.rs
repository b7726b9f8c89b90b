//! Participant order model.
//!
//! A participant order is the transient, per-run representation of one
//! buyer's product selection, used as input to shipping allocation. It is
//! constructed fresh from the party document at calculation time and never
//! persisted by this engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LineItem;

/// Whether a participant is the party host or one of the guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    /// The party organizer, eligible for the revenue voucher.
    Host,
    /// An invited guest placing an order.
    Guest,
}

/// One buyer's order within a party run.
///
/// The shipping target may differ from the buyer: goods can be shipped
/// collectively to the host or to any other participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantOrder {
    /// Identifier of the buyer (host or guest).
    pub participant_id: String,
    /// Whether the buyer is the host or a guest.
    pub role: ParticipantRole,
    /// 1-based guest position in the party's guest list, `None` for the host.
    #[serde(default)]
    pub guest_index: Option<u32>,
    /// Identifier whose address receives the shipment. Resolved at
    /// collection time; defaults to `participant_id` when the party does
    /// not name a separate target.
    pub shipping_target_id: String,
    /// The effective line items of this order. Never empty: orders without
    /// items are excluded from collection and never reach allocation.
    pub line_items: Vec<LineItem>,
}

impl ParticipantOrder {
    /// Returns the order subtotal: the sum of `quantity * rate` over all
    /// line items.
    ///
    /// # Examples
    ///
    /// ```
    /// use party_engine::models::{LineItem, ParticipantOrder, ParticipantRole};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let order = ParticipantOrder {
    ///     participant_id: "CUST-001".to_string(),
    ///     role: ParticipantRole::Guest,
    ///     guest_index: Some(1),
    ///     shipping_target_id: "CUST-001".to_string(),
    ///     line_items: vec![
    ///         LineItem::new("FW-100", Decimal::from(2), Decimal::from_str("24.90").unwrap()),
    ///         LineItem::new("FW-200", Decimal::from(1), Decimal::from_str("12.50").unwrap()),
    ///     ],
    /// };
    /// assert_eq!(order.subtotal(), Decimal::from_str("62.30").unwrap());
    /// ```
    pub fn subtotal(&self) -> Decimal {
        self.line_items.iter().map(LineItem::value).sum()
    }
}

/// A [`ParticipantOrder`] annotated with its allocated shipping cost.
///
/// Produced by the shipping allocator; the note explains how the cost was
/// derived so it can be carried onto the downstream sales order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippedOrder {
    /// The underlying participant order.
    pub order: ParticipantOrder,
    /// The shipping cost allocated to this order.
    pub shipping_cost: Decimal,
    /// Human-readable explanation of the shipping decision.
    pub shipping_note: String,
}
