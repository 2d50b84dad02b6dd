//! Cart and line item types.

use crate::error::CommerceError;
use crate::ids::{LineItemId, UserId};
use crate::money::Money;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A line item in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Line item identifier.
    pub id: LineItemId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Quantity, always positive.
    pub quantity: i64,
}

impl CartItem {
    /// Line total (price * quantity), unrounded.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    /// Sum of line totals, unrounded.
    pub fn sum_line_totals<'a>(
        items: impl IntoIterator<Item = &'a CartItem>,
    ) -> Result<Money, CommerceError> {
        items.into_iter().try_fold(Money::zero(), |acc, item| {
            acc.try_add(&item.line_total()?)
                .ok_or(CommerceError::Overflow)
        })
    }
}

/// Reads an optional whole number, accepting integral floats such as `2.0`.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    match Option::<Number>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Number::Int(n)) => Ok(Some(n)),
        Some(Number::Float(f))
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
        {
            Ok(Some(f as i64))
        }
        Some(Number::Float(f)) => Err(D::Error::custom(format!(
            "expected a whole number, got {}",
            f
        ))),
    }
}

/// Payload for adding an item to a cart.
///
/// Every field is optional on the wire so that missing fields surface as
/// `InvalidItem` instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewCartItem {
    /// Product name, must be non-empty.
    #[serde(default)]
    pub name: Option<String>,
    /// Unit price, must be positive.
    #[serde(default)]
    pub price: Option<Money>,
    /// Quantity, must be a positive integer.
    #[serde(default, deserialize_with = "whole_number")]
    pub quantity: Option<i64>,
    /// Caller-chosen line id. Generated when absent or empty.
    #[serde(default)]
    pub id: Option<String>,
}

impl NewCartItem {
    /// Convenience constructor for a fully specified item.
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            quantity: Some(quantity),
            id: None,
        }
    }

    /// Set an explicit line id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Validate the payload and build a line item.
    pub fn validate(self) -> Result<CartItem, CommerceError> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(CommerceError::InvalidItem("name is required".to_string())),
        };

        let price = match self.price {
            Some(price) if price.is_positive() => price,
            _ => {
                return Err(CommerceError::InvalidItem(
                    "price must be a positive number".to_string(),
                ))
            }
        };

        let quantity = match self.quantity {
            Some(quantity) if quantity > 0 => quantity,
            _ => {
                return Err(CommerceError::InvalidItem(
                    "quantity must be a positive integer".to_string(),
                ))
            }
        };

        let id = match self.id {
            Some(id) if !id.is_empty() => LineItemId::new(id),
            _ => LineItemId::generate(),
        };

        let item = CartItem {
            id,
            name,
            price,
            quantity,
        };
        item.line_total().map_err(|_| {
            CommerceError::InvalidItem("price * quantity is out of range".to_string())
        })?;
        Ok(item)
    }
}

/// Partial update of a line item.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CartItemUpdate {
    /// New quantity. `None` leaves the line unchanged.
    #[serde(default, deserialize_with = "whole_number")]
    pub quantity: Option<i64>,
}

impl CartItemUpdate {
    /// Update that sets the quantity.
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
        }
    }
}

/// A user's shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Owner of the cart.
    pub user_id: UserId,
    /// Items in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
        }
    }

    /// Append a validated item. Lines are never merged.
    ///
    /// Rejected with `InvalidItem` when the cart subtotal would leave the
    /// representable range.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CommerceError> {
        CartItem::sum_line_totals(self.items.iter().chain([&item])).map_err(|_| {
            CommerceError::InvalidItem("cart subtotal is out of range".to_string())
        })?;
        self.items.push(item);
        Ok(())
    }

    /// Remove the first line with the given id.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> Result<CartItem, CommerceError> {
        let index = self
            .items
            .iter()
            .position(|i| &i.id == line_item_id)
            .ok_or_else(|| CommerceError::ItemNotFound(line_item_id.to_string()))?;
        Ok(self.items.remove(index))
    }

    /// Apply a partial update to a line item.
    ///
    /// The item must exist before the quantity is validated.
    pub fn update_item(
        &mut self,
        line_item_id: &LineItemId,
        update: CartItemUpdate,
    ) -> Result<(), CommerceError> {
        let index = self
            .items
            .iter()
            .position(|i| &i.id == line_item_id)
            .ok_or_else(|| CommerceError::ItemNotFound(line_item_id.to_string()))?;

        if let Some(quantity) = update.quantity {
            if quantity <= 0 {
                return Err(CommerceError::InvalidQuantity(quantity));
            }

            let mut updated = self.items[index].clone();
            updated.quantity = quantity;
            let lines = self
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| if i == index { &updated } else { item });
            if CartItem::sum_line_totals(lines).is_err() {
                return Err(CommerceError::InvalidQuantity(quantity));
            }

            self.items[index] = updated;
        }
        Ok(())
    }

    /// Get an item by ID.
    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }
}
