//! Proportional voucher discount application.
//!
//! This module spreads a discount amount across a set of line items in
//! proportion to their value, assigning the exact remainder to the last
//! item so the applied total never drifts from the requested amount.

use rust_decimal::Decimal;

use crate::models::LineItem;

/// The outcome of one discount application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountApplication {
    /// The discount amount that was requested.
    pub requested: Decimal,
    /// The discount actually applied. Equals `requested` unless a rate was
    /// clamped at zero, in which case the excess is lost.
    pub applied: Decimal,
    /// True if at least one item's rate was clamped at zero.
    pub clamped: bool,
}

impl DiscountApplication {
    fn noop(requested: Decimal) -> Self {
        Self {
            requested,
            applied: Decimal::ZERO,
            clamped: false,
        }
    }
}

/// Applies a discount proportionally across line items, mutating rates.
///
/// Each item receives a share of `discount_amount` proportional to its
/// value (`quantity * rate`); the last item receives the exact leftover so
/// the shares always sum to `discount_amount` regardless of intermediate
/// rounding. The share is converted to a per-unit deduction and the item's
/// rate is lowered, clamped at zero. Clamping means the applied total can
/// be less than requested; the result reports this so callers can warn.
///
/// No-ops (returning a zero application) when `items` is empty, when
/// `discount_amount` is not positive, or when the items' total value is
/// not positive. Items with a non-positive quantity are skipped, which
/// keeps them out of the per-unit division.
///
/// # Arguments
///
/// * `items` - The discountable items, mutated in place
/// * `discount_amount` - The total discount to spread
///
/// # Examples
///
/// ```
/// use party_engine::calculation::apply_discount;
/// use party_engine::models::LineItem;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut a = LineItem::new("FW-100", Decimal::from(2), Decimal::from(50));
/// let mut b = LineItem::new("FW-200", Decimal::from(1), Decimal::from(20));
/// let mut items = vec![&mut a, &mut b];
///
/// let outcome = apply_discount(&mut items, Decimal::from(30));
/// assert_eq!(outcome.applied, Decimal::from(30));
/// assert_eq!(a.rate, Decimal::from_str("37.5").unwrap());
/// assert_eq!(b.rate, Decimal::from(15));
/// ```
pub fn apply_discount(
    items: &mut [&mut LineItem],
    discount_amount: Decimal,
) -> DiscountApplication {
    if items.is_empty() || discount_amount <= Decimal::ZERO {
        return DiscountApplication::noop(discount_amount);
    }

    // Items with non-positive quantity never take part in the allocation.
    let valid: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.quantity > Decimal::ZERO)
        .map(|(index, _)| index)
        .collect();

    let total_value: Decimal = valid.iter().map(|&index| items[index].value()).sum();
    if valid.is_empty() || total_value <= Decimal::ZERO {
        return DiscountApplication::noop(discount_amount);
    }

    let mut remaining = discount_amount;
    let mut applied = Decimal::ZERO;
    let mut clamped = false;
    let last = valid[valid.len() - 1];

    for &index in &valid {
        let item = &mut *items[index];
        let item_discount = if index == last {
            // The last item absorbs the rounding remainder.
            remaining
        } else {
            let share = (item.value() / total_value) * discount_amount;
            remaining -= share;
            share
        };

        let discount_per_unit = item_discount / item.quantity;
        let old_rate = item.rate;
        let mut new_rate = old_rate - discount_per_unit;
        if new_rate < Decimal::ZERO {
            new_rate = Decimal::ZERO;
            clamped = true;
        }

        applied += (old_rate - new_rate) * item.quantity;
        item.set_rate(new_rate);
    }

    DiscountApplication {
        requested: discount_amount,
        applied,
        clamped,
    }
}
