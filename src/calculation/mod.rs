//! Calculation logic for the Party Orchestration Engine.
//!
//! This module contains all the calculation functions for orchestrating a
//! party, including total revenue, the voucher tier lookup, proportional
//! voucher discounting, the host voucher usage check, shipping group
//! partitioning, shipping cost allocation, party status derivation, and
//! loyalty point awarding.

mod points_award;
mod revenue;
mod shipping_allocation;
mod shipping_groups;
mod status;
mod voucher_discount;
mod voucher_tiers;
mod voucher_usage;

pub use points_award::{award_points, cancel_points};
pub use revenue::{RevenueResult, calculate_total_revenue};
pub use shipping_allocation::{ShippingAllocationResult, allocate_shipping};
pub use shipping_groups::{ShippingGroup, group_by_shipping_target};
pub use status::derive_status;
pub use voucher_discount::{DiscountApplication, apply_discount};
pub use voucher_tiers::{VoucherLookupResult, lookup_voucher};
pub use voucher_usage::{VoucherPolicy, VoucherUsageResult, check_hostess_voucher_usage};
