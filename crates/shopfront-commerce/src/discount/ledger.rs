//! Loyalty discount codes.
//!
//! Every `N` completed orders unlock one single-use percentage-off code.
//! Only one unused code may be outstanding at a time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::CommerceError;

/// Default number of orders between generated codes.
pub const DEFAULT_ORDERS_PER_DISCOUNT: u32 = 3;

/// Prefix of every generated code.
pub const CODE_PREFIX: &str = "CODE-";

const CODE_SUFFIX_LEN: usize = 8;

/// Fixed discount rate (ten percent).
pub fn default_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// A generated single-use discount code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// The code string (e.g., "CODE-1A2B3C4D").
    pub code: String,
    /// Fraction taken off the subtotal.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    /// Whether the code has been redeemed.
    pub used: bool,
    /// Completed orders at generation time.
    pub generated_at_order_count: usize,
}

/// Code and redemption state, as reported in statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscountCodeStatus {
    /// The code string.
    pub code: String,
    /// Whether the code has been redeemed.
    pub used: bool,
}

/// Append-only ledger of generated codes.
#[derive(Debug, Clone)]
pub struct DiscountLedger {
    codes: Vec<DiscountCode>,
    orders_per_discount: u32,
    next_threshold: usize,
}

impl Default for DiscountLedger {
    fn default() -> Self {
        Self::new(DEFAULT_ORDERS_PER_DISCOUNT)
    }
}

impl DiscountLedger {
    /// Create a ledger unlocking a code every `orders_per_discount` orders.
    ///
    /// A zero interval is treated as one; use [`DiscountLedger::set_threshold`]
    /// for validated input.
    pub fn new(orders_per_discount: u32) -> Self {
        let n = orders_per_discount.max(1);
        Self {
            codes: Vec::new(),
            orders_per_discount: n,
            next_threshold: n as usize,
        }
    }

    /// Change the order interval. Restarts the threshold at `n`.
    pub fn set_threshold(&mut self, n: i64) -> Result<(), CommerceError> {
        let n = u32::try_from(n)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(CommerceError::InvalidThreshold(n))?;
        self.orders_per_discount = n;
        self.next_threshold = n as usize;
        Ok(())
    }

    /// Orders between generated codes.
    pub fn orders_per_discount(&self) -> u32 {
        self.orders_per_discount
    }

    /// Order count at which the next code unlocks.
    pub fn next_threshold(&self) -> usize {
        self.next_threshold
    }

    /// The outstanding unused code, if any.
    pub fn active_code(&self) -> Option<&DiscountCode> {
        self.codes.iter().find(|d| !d.used)
    }

    /// Whether a new code may be generated at the given order count.
    pub fn can_generate(&self, order_count: usize) -> bool {
        self.active_code().is_none() && order_count >= self.next_threshold
    }

    /// Mint a new code and advance the threshold.
    pub fn generate(&mut self, order_count: usize) -> Result<DiscountCode, CommerceError> {
        if !self.can_generate(order_count) {
            return Err(CommerceError::CannotGenerate);
        }

        let code = self.fresh_code();
        let discount = DiscountCode {
            code,
            percentage: default_rate(),
            used: false,
            generated_at_order_count: order_count,
        };
        self.codes.push(discount.clone());
        self.next_threshold += self.orders_per_discount as usize;

        info!(
            code = %discount.code,
            order_count,
            next_threshold = self.next_threshold,
            "generated discount code"
        );
        Ok(discount)
    }

    /// Look up an unused code without redeeming it.
    pub fn find_redeemable(&self, code: &str) -> Result<&DiscountCode, CommerceError> {
        self.codes
            .iter()
            .find(|d| d.code == code)
            .filter(|d| !d.used)
            .ok_or_else(|| CommerceError::InvalidDiscount(code.to_string()))
    }

    /// Mark a code used. Only checkout redeems codes.
    pub(crate) fn redeem(&mut self, code: &str) -> Result<DiscountCode, CommerceError> {
        let discount = self
            .codes
            .iter_mut()
            .find(|d| d.code == code && !d.used)
            .ok_or_else(|| CommerceError::InvalidDiscount(code.to_string()))?;
        discount.used = true;
        Ok(discount.clone())
    }

    /// Every code ever generated, in generation order.
    pub fn codes(&self) -> &[DiscountCode] {
        &self.codes
    }

    /// Codes with their redemption state.
    pub fn statuses(&self) -> Vec<DiscountCodeStatus> {
        self.codes
            .iter()
            .map(|d| DiscountCodeStatus {
                code: d.code.clone(),
                used: d.used,
            })
            .collect()
    }

    fn fresh_code(&self) -> String {
        loop {
            let suffix: String = Uuid::new_v4()
                .simple()
                .to_string()
                .chars()
                .take(CODE_SUFFIX_LEN)
                .collect();
            let code = format!("{}{}", CODE_PREFIX, suffix.to_uppercase());
            if !self.codes.iter().any(|d| d.code == code) {
                return code;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_generate_before_threshold() {
        let mut ledger = DiscountLedger::new(3);
        assert!(!ledger.can_generate(0));
        assert!(!ledger.can_generate(2));
        assert_eq!(ledger.generate(2), Err(CommerceError::CannotGenerate));
        assert!(ledger.codes().is_empty());
    }

    #[test]
    fn test_generate_at_threshold() {
        let mut ledger = DiscountLedger::new(3);
        let code = ledger.generate(3).unwrap();

        assert!(code.code.starts_with(CODE_PREFIX));
        assert_eq!(code.code.len(), CODE_PREFIX.len() + CODE_SUFFIX_LEN);
        assert!(code.code[CODE_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_eq!(code.percentage, Decimal::new(10, 2));
        assert!(!code.used);
        assert_eq!(code.generated_at_order_count, 3);
        assert_eq!(ledger.next_threshold(), 6);
    }

    #[test]
    fn test_unused_code_blocks_generation() {
        let mut ledger = DiscountLedger::new(3);
        ledger.generate(3).unwrap();
        assert!(!ledger.can_generate(100));
        assert_eq!(ledger.generate(100), Err(CommerceError::CannotGenerate));
        assert_eq!(ledger.codes().len(), 1);
    }

    #[test]
    fn test_redeem_unlocks_next_after_threshold() {
        let mut ledger = DiscountLedger::new(3);
        let first = ledger.generate(3).unwrap();
        ledger.redeem(&first.code).unwrap();

        assert!(!ledger.can_generate(5));
        assert!(ledger.can_generate(6));
        let second = ledger.generate(6).unwrap();
        assert_ne!(first.code, second.code);
        assert_eq!(ledger.next_threshold(), 9);
    }

    #[test]
    fn test_redeem_only_once() {
        let mut ledger = DiscountLedger::new(1);
        let code = ledger.generate(1).unwrap();
        assert!(ledger.redeem(&code.code).unwrap().used);
        assert_eq!(
            ledger.redeem(&code.code),
            Err(CommerceError::InvalidDiscount(code.code.clone()))
        );
        assert!(ledger.find_redeemable(&code.code).is_err());
    }

    #[test]
    fn test_unknown_code() {
        let ledger = DiscountLedger::default();
        assert_eq!(
            ledger.find_redeemable("CODE-NOPE"),
            Err(CommerceError::InvalidDiscount("CODE-NOPE".to_string()))
        );
    }

    #[test]
    fn test_set_threshold() {
        let mut ledger = DiscountLedger::default();
        ledger.set_threshold(5).unwrap();
        assert_eq!(ledger.orders_per_discount(), 5);
        assert_eq!(ledger.next_threshold(), 5);

        assert_eq!(ledger.set_threshold(0), Err(CommerceError::InvalidThreshold(0)));
        assert_eq!(ledger.set_threshold(-2), Err(CommerceError::InvalidThreshold(-2)));
        assert_eq!(ledger.orders_per_discount(), 5);
    }

    #[test]
    fn test_statuses_in_generation_order() {
        let mut ledger = DiscountLedger::new(1);
        let a = ledger.generate(1).unwrap();
        ledger.redeem(&a.code).unwrap();
        let b = ledger.generate(2).unwrap();

        let statuses = ledger.statuses();
        assert_eq!(
            statuses,
            vec![
                DiscountCodeStatus { code: a.code, used: true },
                DiscountCodeStatus { code: b.code, used: false },
            ]
        );
    }

    #[test]
    fn test_discount_json_shape() {
        let mut ledger = DiscountLedger::new(1);
        let code = ledger.generate(1).unwrap();
        let json = serde_json::to_value(&code).unwrap();
        assert_eq!(json["percentage"].as_f64(), Some(0.1));
        assert_eq!(json["used"], false);
        assert_eq!(json["generatedAtOrderCount"], 1);
    }
}
