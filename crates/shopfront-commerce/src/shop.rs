//! The shop: owner of all carts, orders and discount codes.

use tracing::info;

use crate::cart::{CartItem, CartItemUpdate, CartStore, NewCartItem};
use crate::checkout::{self, Order};
use crate::discount::{DiscountCode, DiscountLedger, DEFAULT_ORDERS_PER_DISCOUNT};
use crate::error::CommerceError;
use crate::ids::{LineItemId, UserId};
use crate::stats::{self, Stats};

/// Explicit state container for the commerce engine.
///
/// Every operation takes `&self` or `&mut self` and runs to completion.
/// Callers sharing a shop across threads must serialize access to it.
#[derive(Debug, Clone)]
pub struct Shop {
    carts: CartStore,
    orders: Vec<Order>,
    ledger: DiscountLedger,
}

impl Default for Shop {
    fn default() -> Self {
        Self::new(DEFAULT_ORDERS_PER_DISCOUNT)
    }
}

impl Shop {
    /// Create an empty shop unlocking a code every `orders_per_discount` orders.
    pub fn new(orders_per_discount: u32) -> Self {
        Self {
            carts: CartStore::new(),
            orders: Vec::new(),
            ledger: DiscountLedger::new(orders_per_discount),
        }
    }

    /// Add an item to a user's cart and return the updated cart.
    pub fn add_item(&mut self, user_id: &UserId, item: NewCartItem) -> Result<&[CartItem], CommerceError> {
        let cart = self.carts.add_item(user_id, item)?;
        Ok(&cart.items)
    }

    /// A user's cart, empty if they have none.
    pub fn cart(&self, user_id: &UserId) -> &[CartItem] {
        self.carts.items(user_id)
    }

    /// Remove an item from a user's cart.
    pub fn remove_item(
        &mut self,
        user_id: &UserId,
        line_item_id: &LineItemId,
    ) -> Result<&[CartItem], CommerceError> {
        self.carts.remove_item(user_id, line_item_id)
    }

    /// Update an item in a user's cart.
    pub fn update_item(
        &mut self,
        user_id: &UserId,
        line_item_id: &LineItemId,
        update: CartItemUpdate,
    ) -> Result<&[CartItem], CommerceError> {
        self.carts.update_item(user_id, line_item_id, update)
    }

    /// Fail with `ItemNotFound` unless the line item exists.
    pub fn require_item(&self, user_id: &UserId, line_item_id: &LineItemId) -> Result<(), CommerceError> {
        self.carts.require_item(user_id, line_item_id).map(|_| ())
    }

    /// Check out a user's cart, optionally redeeming a discount code.
    pub fn checkout(&mut self, user_id: &UserId, discount_code: Option<&str>) -> Result<Order, CommerceError> {
        checkout::checkout(
            &mut self.carts,
            &mut self.ledger,
            &mut self.orders,
            user_id,
            discount_code,
        )
    }

    /// Whether a discount code can be generated now.
    pub fn can_generate_discount(&self) -> bool {
        self.ledger.can_generate(self.orders.len())
    }

    /// Generate the next discount code.
    pub fn generate_discount(&mut self) -> Result<DiscountCode, CommerceError> {
        self.ledger.generate(self.orders.len())
    }

    /// Change how many orders unlock a code. Survives `reset`.
    pub fn set_threshold(&mut self, n: i64) -> Result<(), CommerceError> {
        self.ledger.set_threshold(n)?;
        info!(orders_per_discount = n, "discount threshold changed");
        Ok(())
    }

    /// Orders between generated codes.
    pub fn orders_per_discount(&self) -> u32 {
        self.ledger.orders_per_discount()
    }

    /// Purchase statistics.
    pub fn stats(&self) -> Result<Stats, CommerceError> {
        stats::compute(&self.orders, &self.ledger)
    }

    /// Discard all carts, orders and codes.
    pub fn reset(&mut self) {
        *self = Shop::new(self.orders_per_discount());
        info!("shop state reset");
    }
}
