//! Order, discount and checkout engine for Shopfront.
//!
//! This crate holds the business rules behind the Shopfront API:
//!
//! - **Cart**: per-user line items with validated add/update/remove
//! - **Discount**: a ledger that unlocks one single-use 10%-off code every N orders
//! - **Checkout**: turns a cart into an immutable order, redeeming a code atomically
//! - **Stats**: totals recomputed from order history on demand
//!
//! All state lives in a [`Shop`] value. It has no interior locking; a
//! multi-threaded host wraps it in a single mutex.
//!
//! # Example
//!
//! ```rust
//! use shopfront_commerce::prelude::*;
//!
//! let mut shop = Shop::default();
//! let user = UserId::new("u1");
//!
//! shop.add_item(&user, NewCartItem::new("Alpha", Money::from_cents(5000), 2))?;
//! let order = shop.checkout(&user, None)?;
//! assert_eq!(order.total, Money::from_cents(10000));
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;
pub mod discount;
pub mod shop;
pub mod stats;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;
pub use shop::Shop;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;
    pub use crate::shop::Shop;

    // Cart
    pub use crate::cart::{Cart, CartItem, CartItemUpdate, CartStore, NewCartItem};

    // Discounts
    pub use crate::discount::{DiscountCode, DiscountCodeStatus, DiscountLedger};

    // Checkout
    pub use crate::checkout::Order;

    // Stats
    pub use crate::stats::Stats;
}
