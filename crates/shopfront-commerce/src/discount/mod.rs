//! Discount ledger module.

mod ledger;

pub use ledger::{
    default_rate, DiscountCode, DiscountCodeStatus, DiscountLedger, CODE_PREFIX,
    DEFAULT_ORDERS_PER_DISCOUNT,
};
