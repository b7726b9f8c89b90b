//! Party document validation and guest list normalization.
//!
//! Recovers the document-level rules the order workflow depends on: the
//! host never appears in her own guest list, guests are unique, and every
//! participant has products before orders are created.

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditWarning, LineItem, Party};

/// The minimum number of guests a party needs before orders are created.
pub const MIN_GUESTS: usize = 3;

/// Normalizes the guest list in place.
///
/// Removes the host if she was also entered as a guest, and removes
/// duplicate guests (keeping the first occurrence). The positionally
/// aligned `guest_selections` rows are removed together with their guests
/// so selections never shift to the wrong participant. Returns one warning
/// per kind of removal.
pub fn normalize_guest_list(party: &mut Party) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();
    let mut removed_host = false;
    let mut removed_duplicates = false;
    let mut seen: Vec<String> = Vec::new();
    let mut index = 0;

    while index < party.guests.len() {
        let customer_id = party.guests[index].customer_id.clone();

        let is_host = !customer_id.is_empty() && customer_id == party.host_id;
        let is_duplicate = !customer_id.is_empty() && seen.contains(&customer_id);

        if is_host || is_duplicate {
            party.guests.remove(index);
            if index < party.guest_selections.len() {
                party.guest_selections.remove(index);
            }
            removed_host |= is_host;
            removed_duplicates |= is_duplicate;
            continue;
        }

        if !customer_id.is_empty() {
            seen.push(customer_id);
        }
        index += 1;
    }

    if removed_host {
        warnings.push(AuditWarning {
            code: "HOST_REMOVED_FROM_GUESTS".to_string(),
            message: format!(
                "Host '{}' was removed from the guest list; she cannot be host and guest at once",
                party.host_id
            ),
            severity: "low".to_string(),
        });
    }
    if removed_duplicates {
        warnings.push(AuditWarning {
            code: "DUPLICATE_GUESTS_REMOVED".to_string(),
            message: "Duplicate guests were removed; each guest may only be listed once"
                .to_string(),
            severity: "low".to_string(),
        });
    }

    warnings
}

/// Validates a party before order creation.
///
/// Requires a host, at least [`MIN_GUESTS`] named guests, and at least one
/// effective line item for the host and for every named guest. Offending
/// participants are listed in the error message so the caller can surface
/// them directly.
///
/// # Errors
///
/// Returns [`EngineError::InvalidParty`] naming the failing field.
pub fn validate_party(party: &Party) -> EngineResult<()> {
    if party.host_id.is_empty() {
        return Err(EngineError::InvalidParty {
            field: "host_id".to_string(),
            message: "a host must be named".to_string(),
        });
    }

    let named_guests = party
        .guests
        .iter()
        .filter(|guest| !guest.customer_id.is_empty())
        .count();
    if named_guests < MIN_GUESTS {
        return Err(EngineError::InvalidParty {
            field: "guests".to_string(),
            message: format!("at least {} guests are required, found {}", MIN_GUESTS, named_guests),
        });
    }

    let mut without_products = Vec::new();

    if !party.host_selection.iter().any(LineItem::is_effective) {
        without_products.push(format!("Host ({})", party.host_id));
    }

    for (index, guest) in party.guests.iter().enumerate() {
        if guest.customer_id.is_empty() {
            continue;
        }
        let has_products = party
            .guest_selection(index)
            .iter()
            .any(LineItem::is_effective);
        if !has_products {
            without_products.push(format!("Guest {} ({})", index + 1, guest.customer_id));
        }
    }

    if !without_products.is_empty() {
        return Err(EngineError::InvalidParty {
            field: "product_selection".to_string(),
            message: format!(
                "the following participants have no products selected: {}",
                without_products.join(", ")
            ),
        });
    }

    Ok(())
}
