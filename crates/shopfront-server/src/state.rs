//! Shared application state.

use std::sync::Arc;

use shopfront_commerce::{CommerceError, Shop};
use tokio::sync::Mutex;

/// State handed to every handler.
///
/// A single lock guards the whole shop, so each request sees and leaves
/// a consistent view of carts, orders and codes.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub shop: Arc<Mutex<Shop>>,
}

impl AppState {
    pub fn new(shop: Shop) -> Self {
        Self {
            shop: Arc::new(Mutex::new(shop)),
        }
    }

    /// Fresh shop unlocking a discount code every `discount_every` orders.
    pub fn with_discount_every(discount_every: i64) -> Result<Self, CommerceError> {
        let mut shop = Shop::default();
        shop.set_threshold(discount_every)?;
        Ok(Self::new(shop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_discount_every() {
        let state = AppState::with_discount_every(5).unwrap();
        assert_eq!(state.shop.lock().await.orders_per_discount(), 5);

        assert_eq!(
            AppState::with_discount_every(0).unwrap_err(),
            CommerceError::InvalidThreshold(0)
        );
    }
}
