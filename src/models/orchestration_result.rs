//! Orchestration result models for the Party Orchestration Engine.
//!
//! This module contains the [`OrchestrationResult`] type and its associated
//! structures that capture all outputs from a party run: order drafts,
//! voucher usage, loyalty points, totals, and audit traces.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrderDraft, PartyStatus, PointsTransaction};

/// The outcome of applying the host voucher to eligible products.
///
/// Partial usage is an informational outcome, not an error: the lapsed
/// remainder is reported so the caller can warn the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VoucherUsage {
    /// The party revenue did not reach the first paying tier.
    NoVoucher,
    /// The voucher was fully consumed by eligible products.
    FullyApplied {
        /// The voucher amount that was applied.
        voucher_amount: Decimal,
    },
    /// Eligible products were worth less than the voucher; the remainder lapses.
    PartiallyApplied {
        /// The voucher amount the host was entitled to.
        voucher_amount: Decimal,
        /// The discount actually applied.
        applied: Decimal,
        /// The lapsed remainder (`voucher_amount - applied`).
        lapsed: Decimal,
    },
    /// The host selected no action-eligible products; the whole voucher lapses.
    NoEligibleItems {
        /// The voucher amount that lapses.
        voucher_amount: Decimal,
    },
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during orchestration.
///
/// Warnings indicate potential issues that don't prevent order creation
/// but may require attention (e.g. a lapsing voucher remainder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an orchestration run.
///
/// Records every decision made during the run for transparency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during the run.
    pub warnings: Vec<AuditWarning>,
    /// The total run duration in microseconds.
    pub duration_us: u64,
}

/// Aggregated monetary totals for an orchestration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyTotals {
    /// Total presentation revenue across host and guests.
    pub total_revenue: Decimal,
    /// The voucher amount the host is entitled to.
    pub voucher_amount: Decimal,
    /// The voucher discount actually applied to eligible products.
    pub voucher_applied: Decimal,
    /// Sum of allocated shipping costs over all orders.
    pub shipping_total: Decimal,
}

/// The complete result of a party orchestration run.
///
/// This struct captures all outputs from the engine, including order
/// drafts, loyalty point transactions, voucher usage, totals, and a
/// complete audit trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Unique identifier for this run.
    pub orchestration_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The party the run was performed for.
    pub party_id: String,
    /// The party status after the run.
    pub status: PartyStatus,
    /// One order draft per participant with effective items.
    pub orders: Vec<OrderDraft>,
    /// Loyalty point transactions for the sales partner, if any.
    pub points: Vec<PointsTransaction>,
    /// The voucher usage outcome.
    pub voucher: VoucherUsage,
    /// Aggregated monetary totals.
    pub totals: PartyTotals,
    /// Complete audit trace of run decisions.
    pub audit_trace: AuditTrace,
}
