//! Line item model for product selections.
//!
//! This module defines the LineItem struct representing one selected
//! product row in a participant's order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents one selected product row: a product, a quantity, and a rate.
///
/// The `amount` field is derived (`quantity * rate`) and is recomputed
/// whenever the rate changes through [`LineItem::set_rate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product code this row refers to.
    pub product_id: String,
    /// Optional display name of the product.
    #[serde(default)]
    pub product_name: Option<String>,
    /// The ordered quantity.
    pub quantity: Decimal,
    /// The per-unit price.
    pub rate: Decimal,
    /// The row total (`quantity * rate`), kept in sync with the rate.
    #[serde(default)]
    pub amount: Decimal,
}

impl LineItem {
    /// Creates a new line item with the amount derived from quantity and rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use party_engine::models::LineItem;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let item = LineItem::new("FW-100", Decimal::from(2), Decimal::from_str("24.90").unwrap());
    /// assert_eq!(item.amount, Decimal::from_str("49.80").unwrap());
    /// ```
    pub fn new(product_id: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        let mut item = Self {
            product_id: product_id.into(),
            product_name: None,
            quantity,
            rate,
            amount: Decimal::ZERO,
        };
        item.amount = item.value();
        item
    }

    /// Returns the monetary value of this row (`quantity * rate`).
    pub fn value(&self) -> Decimal {
        self.quantity * self.rate
    }

    /// Returns true if this row names a product and has a positive quantity.
    ///
    /// Blank rows (no product code) and rows with zero quantity are ignored
    /// by every collector in the engine. This is also what keeps
    /// zero-quantity items away from the per-unit discount division.
    pub fn is_effective(&self) -> bool {
        !self.product_id.is_empty() && self.quantity > Decimal::ZERO
    }

    /// Updates the rate and recomputes the derived amount.
    pub fn set_rate(&mut self, rate: Decimal) {
        self.rate = rate;
        self.amount = self.value();
    }
}
