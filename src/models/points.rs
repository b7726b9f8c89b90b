//! Loyalty point transaction model.
//!
//! Sales partners earn points per sold product. Each transaction records
//! the points earned for one order line; cancellation is a soft flag so
//! that reversed invoices keep their history.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One loyalty point booking for a sales partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsTransaction {
    /// The sales partner receiving the points.
    pub sales_partner: String,
    /// The party document the originating order belongs to.
    pub party_reference: String,
    /// The product that earned the points.
    pub product_id: String,
    /// Display name of the product.
    pub product_name: String,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Points earned per unit, from the product catalog.
    pub points_per_item: u32,
    /// The booking date.
    pub transaction_date: NaiveDate,
    /// Set when the originating invoice was cancelled; the transaction is
    /// kept for history but no longer counts.
    #[serde(default)]
    pub cancelled: bool,
}

impl PointsTransaction {
    /// Returns the total points of this transaction (`quantity * points_per_item`).
    ///
    /// # Examples
    ///
    /// ```
    /// use party_engine::models::PointsTransaction;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let tx = PointsTransaction {
    ///     sales_partner: "PARTNER-07".to_string(),
    ///     party_reference: "PARTY-2025-0001".to_string(),
    ///     product_id: "FW-100".to_string(),
    ///     product_name: "Fibre Cloth".to_string(),
    ///     quantity: Decimal::from(3),
    ///     points_per_item: 5,
    ///     transaction_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
    ///     cancelled: false,
    /// };
    /// assert_eq!(tx.total_points(), Decimal::from(15));
    /// ```
    pub fn total_points(&self) -> Decimal {
        self.quantity * Decimal::from(self.points_per_item)
    }
}
