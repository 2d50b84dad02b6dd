//! Per-user cart storage.

use std::collections::HashMap;

use tracing::debug;

use crate::cart::{Cart, CartItem, CartItemUpdate, NewCartItem};
use crate::error::CommerceError;
use crate::ids::{LineItemId, UserId};

/// In-memory map from user to cart.
///
/// A user with no entry has an empty cart. Mutations on one user never
/// touch another user's cart.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    carts: HashMap<UserId, Cart>,
}

impl CartStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an item, creating the cart on first add.
    pub fn add_item(&mut self, user_id: &UserId, item: NewCartItem) -> Result<&Cart, CommerceError> {
        let item = item.validate()?;
        debug!(user_id = %user_id, item_id = %item.id, quantity = item.quantity, "adding cart item");

        let cart = self
            .carts
            .entry(user_id.clone())
            .or_insert_with(|| Cart::new(user_id.clone()));
        cart.add_item(item)?;
        Ok(cart)
    }

    /// Items in the user's cart, empty when the user has none.
    pub fn items(&self, user_id: &UserId) -> &[CartItem] {
        self.carts
            .get(user_id)
            .map(|c| c.items.as_slice())
            .unwrap_or(&[])
    }

    /// Remove a line item.
    pub fn remove_item(
        &mut self,
        user_id: &UserId,
        line_item_id: &LineItemId,
    ) -> Result<&[CartItem], CommerceError> {
        let cart = self
            .carts
            .get_mut(user_id)
            .ok_or_else(|| CommerceError::ItemNotFound(line_item_id.to_string()))?;
        cart.remove_item(line_item_id)?;
        debug!(user_id = %user_id, item_id = %line_item_id, "removed cart item");
        Ok(&cart.items)
    }

    /// Update a line item in place.
    pub fn update_item(
        &mut self,
        user_id: &UserId,
        line_item_id: &LineItemId,
        update: CartItemUpdate,
    ) -> Result<&[CartItem], CommerceError> {
        let cart = self
            .carts
            .get_mut(user_id)
            .ok_or_else(|| CommerceError::ItemNotFound(line_item_id.to_string()))?;
        cart.update_item(line_item_id, update)?;
        debug!(user_id = %user_id, item_id = %line_item_id, "updated cart item");
        Ok(&cart.items)
    }

    /// Check that a line item exists.
    pub fn require_item(
        &self,
        user_id: &UserId,
        line_item_id: &LineItemId,
    ) -> Result<&CartItem, CommerceError> {
        self.carts
            .get(user_id)
            .and_then(|c| c.get_item(line_item_id))
            .ok_or_else(|| CommerceError::ItemNotFound(line_item_id.to_string()))
    }

    /// Drop the user's cart entirely.
    pub fn clear(&mut self, user_id: &UserId) -> Option<Cart> {
        self.carts.remove(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(qty: i64) -> NewCartItem {
        NewCartItem::new("Item", Money::from_cents(1000), qty)
    }

    #[test]
    fn test_unknown_user_has_empty_cart() {
        let store = CartStore::new();
        assert!(store.items(&UserId::new("nobody")).is_empty());
    }

    #[test]
    fn test_add_items_accumulates_quantity() {
        let mut store = CartStore::new();
        let user = UserId::new("u1");
        store.add_item(&user, item(2)).unwrap();
        let cart = store.add_item(&user, item(3)).unwrap();
        let total: i64 = cart.items.iter().map(|i| i.quantity).sum();
        assert_eq!(total, 5);
        assert_eq!(store.items(&user).len(), 2);
    }

    #[test]
    fn test_invalid_item_does_not_create_cart() {
        let mut store = CartStore::new();
        let user = UserId::new("u1");
        assert!(store.add_item(&user, item(0)).is_err());
        assert!(store.items(&user).is_empty());
    }

    #[test]
    fn test_users_are_isolated() {
        let mut store = CartStore::new();
        store.add_item(&UserId::new("a"), item(1)).unwrap();
        store.add_item(&UserId::new("b"), item(4)).unwrap();
        assert_eq!(store.items(&UserId::new("a")).len(), 1);
        assert_eq!(store.items(&UserId::new("b"))[0].quantity, 4);
    }

    #[test]
    fn test_add_rejects_subtotal_overflow() {
        let mut store = CartStore::new();
        let user = UserId::new("u1");
        let max = NewCartItem::new("Max", Money::new(rust_decimal::Decimal::MAX), 1);
        store.add_item(&user, max.clone()).unwrap();

        assert!(matches!(
            store.add_item(&user, max),
            Err(CommerceError::InvalidItem(_))
        ));
        assert_eq!(store.items(&user).len(), 1);
    }

    #[test]
    fn test_remove_from_unknown_user() {
        let mut store = CartStore::new();
        let result = store.remove_item(&UserId::new("u1"), &LineItemId::new("x"));
        assert_eq!(result, Err(CommerceError::ItemNotFound("x".to_string())));
    }

    #[test]
    fn test_update_and_remove() {
        let mut store = CartStore::new();
        let user = UserId::new("u1");
        store.add_item(&user, item(1).with_id("line-1")).unwrap();

        let items = store
            .update_item(&user, &LineItemId::new("line-1"), CartItemUpdate::quantity(7))
            .unwrap();
        assert_eq!(items[0].quantity, 7);

        let items = store.remove_item(&user, &LineItemId::new("line-1")).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_require_item() {
        let mut store = CartStore::new();
        let user = UserId::new("u1");
        store.add_item(&user, item(1).with_id("line-1")).unwrap();
        assert!(store.require_item(&user, &LineItemId::new("line-1")).is_ok());
        assert!(store.require_item(&user, &LineItemId::new("nope")).is_err());
    }

    #[test]
    fn test_clear() {
        let mut store = CartStore::new();
        let user = UserId::new("u1");
        store.add_item(&user, item(1)).unwrap();
        assert!(store.clear(&user).is_some());
        assert!(store.items(&user).is_empty());
        assert!(store.clear(&user).is_none());
    }
}
