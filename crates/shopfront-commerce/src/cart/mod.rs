//! Shopping cart module.
//!
//! Contains line items, per-user carts and the cart store.

mod cart;
mod store;

pub use cart::{Cart, CartItem, CartItemUpdate, NewCartItem};
pub use store::CartStore;
