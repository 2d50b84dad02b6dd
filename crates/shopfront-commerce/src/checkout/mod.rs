//! Checkout module.
//!
//! Contains the checkout engine and the orders it produces.

mod engine;
mod order;

pub use engine::checkout;
pub use order::Order;
