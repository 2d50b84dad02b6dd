//! Checkout: turns a cart into an order.

use chrono::Utc;
use tracing::info;

use crate::cart::{CartItem, CartStore};
use crate::checkout::Order;
use crate::discount::DiscountLedger;
use crate::error::CommerceError;
use crate::ids::{OrderId, UserId};
use crate::money::Money;

/// Check out a user's cart.
///
/// Validation order is fixed: an empty cart is reported before the
/// discount code is looked at. All checks run before any state changes,
/// so a failed checkout leaves the cart, ledger and history untouched.
/// An empty code string counts as no code. Amounts that leave the
/// representable range fail with `Overflow`, also before any change.
pub fn checkout(
    carts: &mut CartStore,
    ledger: &mut DiscountLedger,
    orders: &mut Vec<Order>,
    user_id: &UserId,
    discount_code: Option<&str>,
) -> Result<Order, CommerceError> {
    let items = carts.items(user_id);
    if items.is_empty() {
        return Err(CommerceError::EmptyCart(user_id.to_string()));
    }

    let subtotal = CartItem::sum_line_totals(items)?;

    let discount_code = discount_code.filter(|c| !c.is_empty());
    let rate = match discount_code {
        Some(code) => Some(ledger.find_redeemable(code)?.percentage),
        None => None,
    };

    let discount_amount = match rate {
        Some(rate) => subtotal
            .try_apply_rate(rate)
            .ok_or(CommerceError::Overflow)?
            .round_cents(),
        None => Money::zero(),
    };
    let total = subtotal
        .try_subtract(&discount_amount)
        .ok_or(CommerceError::Overflow)?
        .round_cents();

    let code_used = match discount_code {
        Some(code) => Some(ledger.redeem(code)?.code),
        None => None,
    };

    let items = carts
        .clear(user_id)
        .map(|cart| cart.items)
        .unwrap_or_default();

    let order = Order {
        id: OrderId::generate(),
        user_id: user_id.clone(),
        items,
        subtotal,
        discount_amount,
        total,
        code_used,
        created_at: Utc::now().timestamp_millis(),
    };
    orders.push(order.clone());

    info!(
        user_id = %order.user_id,
        order_id = %order.id,
        total = %order.total,
        code = order.code_used.as_deref().unwrap_or("-"),
        "order placed"
    );
    Ok(order)
}
