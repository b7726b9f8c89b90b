//! Party status derivation.
//!
//! A party's status follows its contents: guest-gathering until products
//! appear, then product selection, then completed once orders exist.

use crate::models::{Party, PartyStatus};

/// Derives the lifecycle status for a party document.
///
/// `Completed` is sticky: a completed party stays completed no matter what
/// its tables contain. Otherwise the status is `Products` as soon as any
/// participant has an effective line item, and `Guests` before that.
///
/// # Examples
///
/// ```
/// use party_engine::calculation::derive_status;
/// use party_engine::models::{Party, PartyStatus};
///
/// let party = Party {
///     id: "PARTY-2025-0001".to_string(),
///     host_id: "HOST-001".to_string(),
///     sales_partner: None,
///     status: PartyStatus::Guests,
///     host_shipping_target: None,
///     host_selection: vec![],
///     guests: vec![],
///     guest_selections: vec![],
///     cached_total_revenue: None,
/// };
/// assert_eq!(derive_status(&party), PartyStatus::Guests);
/// ```
pub fn derive_status(party: &Party) -> PartyStatus {
    if party.status == PartyStatus::Completed {
        return PartyStatus::Completed;
    }

    if party.has_products() {
        PartyStatus::Products
    } else {
        PartyStatus::Guests
    }
}
