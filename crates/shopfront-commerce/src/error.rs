//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart, discount and checkout operations.
///
/// Every variant except `Overflow` is a caller-input failure. None of them
/// leave the shop in a partially mutated state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Item payload failed validation.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty for user {0}")]
    EmptyCart(String),

    /// Discount code unknown or already redeemed.
    #[error("Invalid discount code: {0}")]
    InvalidDiscount(String),

    /// Discount generation not currently allowed.
    #[error("Discount code cannot be generated yet")]
    CannotGenerate,

    /// Order-count threshold must be positive.
    #[error("Invalid discount threshold: {0}")]
    InvalidThreshold(i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money or quantity calculation")]
    Overflow,
}

impl CommerceError {
    /// Stable machine-readable code, used at the HTTP boundary.
    pub fn code(&self) -> &'static str {
        match self {
            CommerceError::InvalidItem(_) => "invalid_item",
            CommerceError::ItemNotFound(_) => "item_not_found",
            CommerceError::InvalidQuantity(_) => "invalid_quantity",
            CommerceError::EmptyCart(_) => "empty_cart",
            CommerceError::InvalidDiscount(_) => "invalid_discount",
            CommerceError::CannotGenerate => "not_available",
            CommerceError::InvalidThreshold(_) => "invalid_threshold",
            CommerceError::Overflow => "overflow",
        }
    }

    /// Check if this error means the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommerceError::ItemNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CommerceError::InvalidItem("name".into()).code(), "invalid_item");
        assert_eq!(CommerceError::ItemNotFound("x".into()).code(), "item_not_found");
        assert_eq!(CommerceError::InvalidQuantity(0).code(), "invalid_quantity");
        assert_eq!(CommerceError::EmptyCart("u1".into()).code(), "empty_cart");
        assert_eq!(CommerceError::InvalidDiscount("C".into()).code(), "invalid_discount");
        assert_eq!(CommerceError::CannotGenerate.code(), "not_available");
        assert_eq!(CommerceError::InvalidThreshold(0).code(), "invalid_threshold");
        assert_eq!(CommerceError::Overflow.code(), "overflow");
    }

    #[test]
    fn test_not_found_classification() {
        assert!(CommerceError::ItemNotFound("x".into()).is_not_found());
        assert!(!CommerceError::EmptyCart("u1".into()).is_not_found());
    }
}
