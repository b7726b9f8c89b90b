//! Loyalty point awarding for sales partners.
//!
//! Each order line whose product carries points earns the party's sales
//! partner one transaction. Without a sales partner no points are awarded.

use chrono::NaiveDate;

use crate::config::ProductCatalog;
use crate::models::{OrderDraft, PointsTransaction};

/// Awards loyalty points for a set of order drafts.
///
/// One [`PointsTransaction`] is created per effective order line whose
/// product has a positive points value in the catalog. Lines with unknown
/// products earn nothing. When `sales_partner` is `None`, the result is
/// empty — points always belong to a partner.
///
/// # Arguments
///
/// * `orders` - The order drafts produced by the orchestration run
/// * `catalog` - The product catalog carrying per-unit points
/// * `sales_partner` - The partner credited with the party, if any
/// * `transaction_date` - The booking date for all transactions
///
/// # Examples
///
/// ```
/// use party_engine::calculation::award_points;
/// use party_engine::config::{ProductCatalog, ProductInfo};
/// use party_engine::models::{LineItem, OrderDraft};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
///
/// let mut products = HashMap::new();
/// products.insert("FW-100".to_string(), ProductInfo {
///     name: "Fibre Cloth".to_string(),
///     action_eligible: true,
///     points: 5,
/// });
/// let catalog = ProductCatalog { products };
///
/// let order = OrderDraft {
///     customer_id: "CUST-001".to_string(),
///     shipping_target_id: "CUST-001".to_string(),
///     items: vec![LineItem::new("FW-100", Decimal::from(2), Decimal::from(30))],
///     shipping_cost: Decimal::ZERO,
///     shipping_note: String::new(),
///     remarks: String::new(),
///     party_reference: "PARTY-2025-0001".to_string(),
///     sales_partner: Some("PARTNER-07".to_string()),
///     skip_address_checks: false,
/// };
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let transactions = award_points(&[order], &catalog, Some("PARTNER-07"), date);
/// assert_eq!(transactions.len(), 1);
/// assert_eq!(transactions[0].total_points(), Decimal::from(10));
/// ```
pub fn award_points(
    orders: &[OrderDraft],
    catalog: &ProductCatalog,
    sales_partner: Option<&str>,
    transaction_date: NaiveDate,
) -> Vec<PointsTransaction> {
    let Some(partner) = sales_partner else {
        return Vec::new();
    };

    let mut transactions = Vec::new();

    for order in orders {
        for item in &order.items {
            if !item.is_effective() {
                continue;
            }

            let points_per_item = catalog.points_for(&item.product_id);
            if points_per_item == 0 {
                continue;
            }

            transactions.push(PointsTransaction {
                sales_partner: partner.to_string(),
                party_reference: order.party_reference.clone(),
                product_id: item.product_id.clone(),
                product_name: catalog.name_for(&item.product_id).to_string(),
                quantity: item.quantity,
                points_per_item,
                transaction_date,
                cancelled: false,
            });
        }
    }

    transactions
}

/// Cancels point transactions in place, returning how many were newly
/// cancelled. Already-cancelled transactions are left untouched so the
/// operation is idempotent.
pub fn cancel_points(transactions: &mut [PointsTransaction]) -> usize {
    let mut cancelled = 0;
    for transaction in transactions.iter_mut() {
        if !transaction.cancelled {
            transaction.cancelled = true;
            cancelled += 1;
        }
    }
    cancelled
}
