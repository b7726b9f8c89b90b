//! Full party orchestration: from a party document to order drafts.
//!
//! This module wires the individual calculations together in the order the
//! business expects: normalize and validate the party, compute revenue and
//! the host voucher, apply the voucher discount, allocate shipping, build
//! one order draft per participant, and award loyalty points.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{
    VoucherPolicy, allocate_shipping, award_points, calculate_total_revenue,
    check_hostess_voucher_usage, derive_status, lookup_voucher,
};
use crate::config::PartyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, OrchestrationResult, OrderDraft, Party, PartyStatus,
    PartyTotals, ShippedOrder, VoucherUsage,
};

use super::collect::collect_participant_orders;
use super::validation::{normalize_guest_list, validate_party};

/// Capabilities passed down to the order-persisting workflow.
///
/// This replaces runtime method patching on the order object: the caller
/// states up front whether downstream address validation is to be skipped,
/// and every draft carries that decision explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Skip downstream address validation when persisting drafts.
    #[serde(default)]
    pub skip_address_checks: bool,
}

/// Options controlling one orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationOptions {
    /// Reuse the party's cached total revenue instead of recalculating.
    #[serde(default)]
    pub skip_recalculation: bool,
    /// How to treat a voucher that cannot be fully consumed.
    #[serde(default)]
    pub on_underused_voucher: VoucherPolicy,
    /// Capabilities for the downstream order-persisting workflow.
    #[serde(default)]
    pub validation: ValidationPolicy,
    /// Booking date for loyalty point transactions.
    pub transaction_date: NaiveDate,
}

impl OrchestrationOptions {
    /// Creates options with defaults for everything but the booking date.
    pub fn new(transaction_date: NaiveDate) -> Self {
        Self {
            skip_recalculation: false,
            on_underused_voucher: VoucherPolicy::default(),
            validation: ValidationPolicy::default(),
            transaction_date,
        }
    }
}

/// Runs the full orchestration for one party.
///
/// Mutates the party in place the way the document workflow does: the
/// guest list is normalized, the host's rates carry the voucher discount,
/// the total revenue is cached, and the status moves to `Completed` on
/// success. On any error the party's status is left unchanged.
///
/// # Arguments
///
/// * `party` - The party document, mutated in place
/// * `config` - The loaded program configuration
/// * `options` - Run options (recalculation, voucher policy, validation)
///
/// # Errors
///
/// * [`EngineError::PartyAlreadyCompleted`] when orders already exist
/// * [`EngineError::InvalidParty`] when validation fails
/// * [`EngineError::VoucherUnderused`] under [`VoucherPolicy::Block`]
pub fn build_party_orders(
    party: &mut Party,
    config: &PartyConfig,
    options: &OrchestrationOptions,
) -> EngineResult<OrchestrationResult> {
    let start_time = Instant::now();

    if party.status == PartyStatus::Completed {
        return Err(EngineError::PartyAlreadyCompleted {
            party_id: party.id.clone(),
        });
    }

    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    warnings.extend(normalize_guest_list(party));
    party.status = derive_status(party);
    validate_party(party)?;

    // Total presentation revenue, cached on the document for later runs.
    let revenue = calculate_total_revenue(party, options.skip_recalculation, step_number);
    let total_revenue = revenue.total_revenue;
    party.cached_total_revenue = Some(total_revenue);
    audit_steps.push(revenue.audit_step);
    step_number += 1;

    // Host voucher: tier lookup, then usage check with discount application.
    let lookup = lookup_voucher(config.voucher_table(), total_revenue, step_number);
    let voucher_amount = lookup.amount;
    audit_steps.push(lookup.audit_step);
    step_number += 1;

    let usage_result = check_hostess_voucher_usage(
        &mut party.host_selection,
        config.catalog(),
        voucher_amount,
        options.on_underused_voucher,
        step_number,
    )?;
    audit_steps.push(usage_result.audit_step);
    warnings.extend(usage_result.warning.clone());
    step_number += 1;

    // Shipping: collect per-participant orders and allocate costs.
    let participant_orders = collect_participant_orders(party);
    let allocation = allocate_shipping(
        &participant_orders,
        config.shipping().free_threshold,
        config.shipping().flat_fee,
        step_number,
    );
    audit_steps.extend(allocation.audit_steps);

    let orders: Vec<OrderDraft> = allocation
        .orders
        .iter()
        .map(|shipped| draft_from(shipped, party, options))
        .collect();

    let points = award_points(
        &orders,
        config.catalog(),
        party.sales_partner.as_deref(),
        options.transaction_date,
    );

    let voucher_applied = match &usage_result.usage {
        VoucherUsage::FullyApplied { voucher_amount } => *voucher_amount,
        VoucherUsage::PartiallyApplied { applied, .. } => *applied,
        VoucherUsage::NoVoucher | VoucherUsage::NoEligibleItems { .. } => Decimal::ZERO,
    };

    party.status = PartyStatus::Completed;

    Ok(OrchestrationResult {
        orchestration_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        party_id: party.id.clone(),
        status: party.status,
        orders,
        points,
        voucher: usage_result.usage,
        totals: PartyTotals {
            total_revenue,
            voucher_amount,
            voucher_applied,
            shipping_total: allocation.shipping_total,
        },
        audit_trace: AuditTrace {
            steps: audit_steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

fn draft_from(shipped: &ShippedOrder, party: &Party, options: &OrchestrationOptions) -> OrderDraft {
    let order = &shipped.order;
    OrderDraft {
        customer_id: order.participant_id.clone(),
        shipping_target_id: order.shipping_target_id.clone(),
        items: order.line_items.clone(),
        shipping_cost: shipped.shipping_cost,
        shipping_note: shipped.shipping_note.clone(),
        remarks: format!(
            "Created from party: {} | Customer: {} | Ship to: {}",
            party.id, order.participant_id, order.shipping_target_id
        ),
        party_reference: party.id.clone(),
        sales_partner: party.sales_partner.clone(),
        skip_address_checks: options.validation.skip_address_checks,
    }
}
