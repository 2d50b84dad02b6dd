//! Purchase statistics, derived from order history on every call.

use serde::{Deserialize, Serialize};

use crate::checkout::Order;
use crate::discount::{DiscountCodeStatus, DiscountLedger};
use crate::error::CommerceError;
use crate::money::Money;

/// Aggregate view over all completed orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Sum of quantities across every item of every order.
    pub items_purchased_count: i64,
    /// Sum of order totals, rounded to cents.
    pub total_purchase_amount: Money,
    /// Sum of discount amounts, rounded to cents.
    pub total_discount_amount: Money,
    /// Every generated code, in generation order.
    pub discount_codes: Vec<DiscountCodeStatus>,
    /// Number of completed orders.
    pub order_count: usize,
}

/// Compute statistics from the order history and discount ledger.
///
/// Fails with `Overflow` when a count or sum leaves the representable range.
pub fn compute(orders: &[Order], ledger: &DiscountLedger) -> Result<Stats, CommerceError> {
    let items_purchased_count = orders.iter().try_fold(0i64, |acc, order| {
        acc.checked_add(order.item_count()?)
            .ok_or(CommerceError::Overflow)
    })?;
    let total_purchase_amount =
        Money::try_sum(orders.iter().map(|o| o.total)).ok_or(CommerceError::Overflow)?;
    let total_discount_amount =
        Money::try_sum(orders.iter().map(|o| o.discount_amount)).ok_or(CommerceError::Overflow)?;

    Ok(Stats {
        items_purchased_count,
        total_purchase_amount: total_purchase_amount.round_cents(),
        total_discount_amount: total_discount_amount.round_cents(),
        discount_codes: ledger.statuses(),
        order_count: orders.len(),
    })
}
