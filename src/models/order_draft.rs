//! Order draft model.
//!
//! An order draft is the in-memory stand-in for the sales order the
//! downstream ERP will create: one per participant with items, resolved
//! shipping target, allocated shipping cost, and the validation capabilities
//! the persisting workflow needs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LineItem;

/// A sales order draft produced by the orchestration run.
///
/// The billing side always belongs to the buying customer; the shipping
/// side belongs to the shipping target, which may be a different
/// participant. Address resolution against the customer database is the
/// caller's job; `skip_address_checks` tells the caller whether downstream
/// address validation should be bypassed for this draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// The buying customer this order is invoiced to.
    pub customer_id: String,
    /// The participant whose address receives the goods.
    pub shipping_target_id: String,
    /// The ordered items, with any voucher discount already applied.
    pub items: Vec<LineItem>,
    /// The shipping cost allocated to this order.
    pub shipping_cost: Decimal,
    /// Explanation of the shipping decision, carried onto the order.
    pub shipping_note: String,
    /// Free-text remarks describing the order's origin.
    pub remarks: String,
    /// The party document this order was created from.
    pub party_reference: String,
    /// Sales partner credited with the order, if any.
    #[serde(default)]
    pub sales_partner: Option<String>,
    /// Whether downstream address validation should be bypassed when this
    /// draft is persisted.
    #[serde(default)]
    pub skip_address_checks: bool,
}

impl OrderDraft {
    /// Returns the goods subtotal of this draft (excluding shipping).
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::value).sum()
    }

    /// Returns the order total including the allocated shipping cost.
    pub fn total(&self) -> Decimal {
        self.subtotal() + self.shipping_cost
    }
}
