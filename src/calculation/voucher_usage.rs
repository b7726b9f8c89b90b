//! Host voucher usage check and discount orchestration.
//!
//! This module decides how much of the host's voucher can actually be
//! consumed by her action-eligible products, applies the discount, and
//! classifies the outcome. Underuse handling is a configurable policy
//! because the business has wavered between hard-blocking and warning.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ProductCatalog;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, LineItem, VoucherUsage};

use super::voucher_discount::apply_discount;

/// What to do when the voucher cannot be fully consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherPolicy {
    /// Reject the run with [`EngineError::VoucherUnderused`] so the caller
    /// can let the host add eligible products first.
    Block,
    /// Apply what fits, let the remainder lapse, and record a warning.
    #[default]
    WarnAndContinue,
}

/// The result of the voucher usage check.
#[derive(Debug, Clone)]
pub struct VoucherUsageResult {
    /// The classified outcome.
    pub usage: VoucherUsage,
    /// A warning describing any lapsed amount, for the audit trace.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

/// Checks voucher usage against the host's selection and applies the discount.
///
/// Action-eligible items are those with an effective quantity, a positive
/// rate, and the catalog's action flag. The discount applied is
/// `min(eligible value, voucher_amount)`, spread proportionally via
/// [`apply_discount`] (mutating the host's rates in place).
///
/// Under [`VoucherPolicy::Block`] an underused voucher returns
/// [`EngineError::VoucherUnderused`] *before* any rates are touched, so a
/// blocked run leaves the selection unchanged. Under
/// [`VoucherPolicy::WarnAndContinue`] the lapse is reported as a warning.
///
/// # Arguments
///
/// * `host_items` - The host's product selection, mutated in place
/// * `catalog` - The product catalog carrying the action-eligible flags
/// * `voucher_amount` - The voucher amount from the tier lookup
/// * `policy` - How to treat an underused voucher
/// * `step_number` - The step number for audit trail sequencing
pub fn check_hostess_voucher_usage(
    host_items: &mut [LineItem],
    catalog: &ProductCatalog,
    voucher_amount: Decimal,
    policy: VoucherPolicy,
    step_number: u32,
) -> EngineResult<VoucherUsageResult> {
    if voucher_amount <= Decimal::ZERO {
        let audit_step = usage_audit_step(
            step_number,
            voucher_amount,
            Decimal::ZERO,
            Decimal::ZERO,
            "no_voucher",
            "No voucher earned, nothing to apply".to_string(),
        );
        return Ok(VoucherUsageResult {
            usage: VoucherUsage::NoVoucher,
            warning: None,
            audit_step,
        });
    }

    let is_discountable = |item: &LineItem| {
        item.is_effective() && item.rate > Decimal::ZERO && catalog.is_action_eligible(&item.product_id)
    };

    let eligible_value: Decimal = host_items
        .iter()
        .filter(|item| is_discountable(item))
        .map(LineItem::value)
        .sum();

    if eligible_value <= Decimal::ZERO {
        if policy == VoucherPolicy::Block {
            return Err(EngineError::VoucherUnderused {
                voucher_amount,
                eligible_value: Decimal::ZERO,
            });
        }

        let warning = AuditWarning {
            code: "VOUCHER_LAPSED".to_string(),
            message: format!(
                "The host has a voucher of {} but no action-eligible products; the whole voucher lapses",
                voucher_amount.normalize()
            ),
            severity: "high".to_string(),
        };
        let audit_step = usage_audit_step(
            step_number,
            voucher_amount,
            Decimal::ZERO,
            Decimal::ZERO,
            "no_eligible_items",
            format!(
                "No action-eligible products selected; voucher {} lapses",
                voucher_amount.normalize()
            ),
        );
        return Ok(VoucherUsageResult {
            usage: VoucherUsage::NoEligibleItems { voucher_amount },
            warning: Some(warning),
            audit_step,
        });
    }

    if eligible_value < voucher_amount && policy == VoucherPolicy::Block {
        // Blocked before mutation so the caller can retry with more products.
        return Err(EngineError::VoucherUnderused {
            voucher_amount,
            eligible_value,
        });
    }

    let discount_amount = voucher_amount.min(eligible_value);
    let mut eligible: Vec<&mut LineItem> = host_items
        .iter_mut()
        .filter(|item| is_discountable(item))
        .collect();
    let application = apply_discount(&mut eligible, discount_amount);

    if eligible_value < voucher_amount {
        let lapsed = voucher_amount - application.applied;
        let warning = AuditWarning {
            code: "VOUCHER_PARTIALLY_USED".to_string(),
            message: format!(
                "The host has a voucher of {} but only {} in eligible products; {} lapses",
                voucher_amount.normalize(),
                eligible_value.normalize(),
                lapsed.normalize()
            ),
            severity: "medium".to_string(),
        };
        let audit_step = usage_audit_step(
            step_number,
            voucher_amount,
            eligible_value,
            application.applied,
            "partially_applied",
            format!(
                "Applied {} of voucher {}, {} lapses",
                application.applied.normalize(),
                voucher_amount.normalize(),
                lapsed.normalize()
            ),
        );
        return Ok(VoucherUsageResult {
            usage: VoucherUsage::PartiallyApplied {
                voucher_amount,
                applied: application.applied,
                lapsed,
            },
            warning: Some(warning),
            audit_step,
        });
    }

    let audit_step = usage_audit_step(
        step_number,
        voucher_amount,
        eligible_value,
        application.applied,
        "fully_applied",
        format!(
            "Voucher {} fully applied across eligible products worth {}",
            voucher_amount.normalize(),
            eligible_value.normalize()
        ),
    );
    Ok(VoucherUsageResult {
        usage: VoucherUsage::FullyApplied { voucher_amount },
        warning: None,
        audit_step,
    })
}

fn usage_audit_step(
    step_number: u32,
    voucher_amount: Decimal,
    eligible_value: Decimal,
    applied: Decimal,
    outcome: &str,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "voucher_usage".to_string(),
        rule_name: "Host Voucher Usage".to_string(),
        input: serde_json::json!({
            "voucher_amount": voucher_amount.normalize().to_string(),
            "eligible_value": eligible_value.normalize().to_string()
        }),
        output: serde_json::json!({
            "outcome": outcome,
            "applied": applied.normalize().to_string()
        }),
        reasoning,
    }
}
