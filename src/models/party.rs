//! Party document model.
//!
//! This module defines the Party struct: one sales presentation event with
//! a host, a guest list, and per-participant product selections. The engine
//! consumes a party snapshot supplied by the caller; persistence of the
//! document itself is an external concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LineItem;

/// Lifecycle status of a party document.
///
/// Derived from the document contents: a party starts in `Guests`, moves to
/// `Products` once any participant has selected something, and becomes
/// `Completed` when orders have been created. `Completed` is sticky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyStatus {
    /// Guests are still being gathered; no products selected yet.
    Guests,
    /// At least one participant has selected products.
    Products,
    /// Orders have been created for this party.
    Completed,
}

impl std::fmt::Display for PartyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartyStatus::Guests => write!(f, "Guests"),
            PartyStatus::Products => write!(f, "Products"),
            PartyStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// One invited guest on the party's guest list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    /// Customer identifier of the guest.
    pub customer_id: String,
    /// Optional override: the participant whose address this guest's goods
    /// are shipped to (e.g. everything to the host). Defaults to the guest.
    #[serde(default)]
    pub shipping_target_id: Option<String>,
}

/// A party document: one host, a guest list, and product selections.
///
/// `guest_selections` is positionally aligned with `guests`: the selection
/// at index `i` belongs to the guest at index `i`. Normalization keeps the
/// two lists in lockstep when guests are removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Identifier of this party document.
    pub id: String,
    /// Customer identifier of the host ("Gastgeberin").
    pub host_id: String,
    /// Sales partner credited with this party, if any. Required for
    /// loyalty points to be awarded.
    #[serde(default)]
    pub sales_partner: Option<String>,
    /// Current lifecycle status.
    pub status: PartyStatus,
    /// Optional override for where the host's goods are shipped.
    #[serde(default)]
    pub host_shipping_target: Option<String>,
    /// The host's product selection.
    #[serde(default)]
    pub host_selection: Vec<LineItem>,
    /// The invited guests, in list order.
    #[serde(default)]
    pub guests: Vec<Guest>,
    /// Per-guest product selections, aligned with `guests`.
    #[serde(default)]
    pub guest_selections: Vec<Vec<LineItem>>,
    /// Total presentation revenue from the last calculation run, used when
    /// recalculation is explicitly skipped.
    #[serde(default)]
    pub cached_total_revenue: Option<Decimal>,
}

impl Party {
    /// Returns the selection for the guest at `index`, or an empty slice if
    /// no selection row exists for that position.
    pub fn guest_selection(&self, index: usize) -> &[LineItem] {
        self.guest_selections
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true if any participant has at least one effective line item.
    pub fn has_products(&self) -> bool {
        self.host_selection.iter().any(LineItem::is_effective)
            || self
                .guest_selections
                .iter()
                .flatten()
                .any(LineItem::is_effective)
    }
}
