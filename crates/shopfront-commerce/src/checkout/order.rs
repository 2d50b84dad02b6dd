//! Order types.

use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::error::CommerceError;
use crate::ids::{OrderId, UserId};
use crate::money::Money;

/// A completed checkout. Never modified after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Customer who checked out.
    pub user_id: UserId,
    /// Cart contents at checkout time.
    pub items: Vec<CartItem>,
    /// Sum of line totals, unrounded.
    pub subtotal: Money,
    /// Amount taken off by a discount code, rounded to cents.
    pub discount_amount: Money,
    /// Amount charged, rounded to cents.
    pub total: Money,
    /// Discount code redeemed by this order.
    pub code_used: Option<String>,
    /// Unix timestamp of creation, in milliseconds.
    pub created_at: i64,
}

impl Order {
    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> Result<i64, CommerceError> {
        self.items.iter().try_fold(0i64, |acc, item| {
            acc.checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::LineItemId;

    fn sample() -> Order {
        Order {
            id: OrderId::new("ord-1"),
            user_id: UserId::new("u1"),
            items: vec![
                CartItem {
                    id: LineItemId::new("a"),
                    name: "A".to_string(),
                    price: Money::from_cents(2000),
                    quantity: 2,
                },
                CartItem {
                    id: LineItemId::new("b"),
                    name: "B".to_string(),
                    price: Money::from_cents(500),
                    quantity: 3,
                },
            ],
            subtotal: Money::from_cents(5500),
            discount_amount: Money::zero(),
            total: Money::from_cents(5500),
            code_used: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_item_count() {
        assert_eq!(sample().item_count(), Ok(5));
    }

    #[test]
    fn test_item_count_overflow() {
        let mut order = sample();
        order.items[0].quantity = i64::MAX;
        assert_eq!(order.item_count(), Err(CommerceError::Overflow));
    }

    #[test]
    fn test_order_json_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["discountAmount"].as_f64(), Some(0.0));
        assert!(json["codeUsed"].is_null());
        assert!(json.get("createdAt").is_some());
    }
}
