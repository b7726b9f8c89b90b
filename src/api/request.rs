//! Request types for the Party Orchestration Engine API.
//!
//! This module defines the JSON request structures for the `/orchestrate`
//! endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::VoucherPolicy;
use crate::models::{Guest, LineItem, Party, PartyStatus};
use crate::orders::{OrchestrationOptions, ValidationPolicy};

/// Request body for the `/orchestrate` endpoint.
///
/// Contains the party snapshot to orchestrate and optional run options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationRequest {
    /// The party document to orchestrate.
    pub party: PartyRequest,
    /// Run options; defaults apply when omitted.
    #[serde(default)]
    pub options: Option<OptionsRequest>,
}

/// Party information in an orchestration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyRequest {
    /// Identifier of the party document.
    pub id: String,
    /// Customer identifier of the host.
    pub host_id: String,
    /// Sales partner credited with the party.
    #[serde(default)]
    pub sales_partner: Option<String>,
    /// Current lifecycle status.
    #[serde(default = "default_status")]
    pub status: PartyStatus,
    /// Optional override for where the host's goods are shipped.
    #[serde(default)]
    pub host_shipping_target: Option<String>,
    /// The host's product selection.
    #[serde(default)]
    pub host_selection: Vec<LineItemRequest>,
    /// The invited guests, in list order.
    #[serde(default)]
    pub guests: Vec<GuestRequest>,
    /// Per-guest product selections, aligned with `guests`.
    #[serde(default)]
    pub guest_selections: Vec<Vec<LineItemRequest>>,
    /// Cached total revenue from a previous run.
    #[serde(default)]
    pub cached_total_revenue: Option<Decimal>,
}

fn default_status() -> PartyStatus {
    PartyStatus::Products
}

/// Guest information in an orchestration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestRequest {
    /// Customer identifier of the guest.
    pub customer_id: String,
    /// Optional shipping target override for this guest.
    #[serde(default)]
    pub shipping_target_id: Option<String>,
}

/// Line item information in an orchestration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    /// The product code.
    pub product_id: String,
    /// Optional display name of the product.
    #[serde(default)]
    pub product_name: Option<String>,
    /// The ordered quantity.
    pub quantity: Decimal,
    /// The per-unit price.
    pub rate: Decimal,
}

/// Run options in an orchestration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsRequest {
    /// Reuse the party's cached total revenue instead of recalculating.
    #[serde(default)]
    pub skip_recalculation: bool,
    /// How to treat a voucher that cannot be fully consumed.
    #[serde(default)]
    pub on_underused_voucher: VoucherPolicy,
    /// Skip downstream address validation when persisting drafts.
    #[serde(default)]
    pub skip_address_checks: bool,
    /// Booking date for loyalty point transactions; defaults to today.
    #[serde(default)]
    pub transaction_date: Option<NaiveDate>,
}

impl From<LineItemRequest> for LineItem {
    fn from(req: LineItemRequest) -> Self {
        let mut item = LineItem::new(req.product_id, req.quantity, req.rate);
        item.product_name = req.product_name;
        item
    }
}

impl From<GuestRequest> for Guest {
    fn from(req: GuestRequest) -> Self {
        Guest {
            customer_id: req.customer_id,
            shipping_target_id: req.shipping_target_id,
        }
    }
}

impl From<PartyRequest> for Party {
    fn from(req: PartyRequest) -> Self {
        Party {
            id: req.id,
            host_id: req.host_id,
            sales_partner: req.sales_partner,
            status: req.status,
            host_shipping_target: req.host_shipping_target,
            host_selection: req.host_selection.into_iter().map(Into::into).collect(),
            guests: req.guests.into_iter().map(Into::into).collect(),
            guest_selections: req
                .guest_selections
                .into_iter()
                .map(|selection| selection.into_iter().map(Into::into).collect())
                .collect(),
            cached_total_revenue: req.cached_total_revenue,
        }
    }
}

impl OptionsRequest {
    /// Resolves the request options into engine options, defaulting the
    /// booking date to `fallback_date` when none was supplied.
    pub fn into_options(self, fallback_date: NaiveDate) -> OrchestrationOptions {
        OrchestrationOptions {
            skip_recalculation: self.skip_recalculation,
            on_underused_voucher: self.on_underused_voucher,
            validation: ValidationPolicy {
                skip_address_checks: self.skip_address_checks,
            },
            transaction_date: self.transaction_date.unwrap_or(fallback_date),
        }
    }
}
