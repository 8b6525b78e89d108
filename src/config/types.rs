//! Configuration types for discount rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult, ensure_rate};
use crate::models::ItemId;

/// Fixed amounts added by the default rule for member customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    /// Added to the discounted total of premium carts holding electronics.
    pub premium_electronics: Decimal,
    /// Added to the discounted total of prime carts.
    pub prime: Decimal,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            premium_electronics: Decimal::new(325, 0),
            prime: Decimal::new(15, 0),
        }
    }
}

/// One configured rule invocation.
///
/// Rules are tagged by a `rule` field:
///
/// ```yaml
/// - rule: bulk
///   quantity: 5
///   rate: "0.1"
/// - rule: flash_sale
///   rate: "0.2"
///   items: [1, 4]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DiscountRule {
    /// The engine's default percentage-off rule.
    Percentage,
    /// Discount items bought in at least `quantity` units.
    Bulk {
        /// Minimum quantity for an item to qualify.
        quantity: u32,
        /// Rate taken off qualifying item prices.
        rate: Decimal,
    },
    /// Discount the cart total during `season`.
    Seasonal {
        /// Season name; only "holiday" triggers the discount.
        season: String,
        /// Rate taken off the total.
        rate: Decimal,
    },
    /// Discount items in one category.
    Category {
        /// Category to discount.
        category: String,
        /// Rate taken off matching item prices.
        rate: Decimal,
    },
    /// Discount listed items.
    FlashSale {
        /// Rate taken off listed item prices.
        rate: Decimal,
        /// Item ids on sale.
        #[serde(default)]
        items: Vec<ItemId>,
    },
    /// Discount the total for loyal customers.
    Loyalty {
        /// Years of loyalty (recorded, not used for eligibility).
        #[serde(default)]
        years: u32,
        /// Rate taken off the total.
        rate: Decimal,
    },
}

impl DiscountRule {
    /// The rate this rule takes off, if it carries its own.
    pub fn rate(&self) -> Option<Decimal> {
        match self {
            DiscountRule::Percentage => None,
            DiscountRule::Bulk { rate, .. }
            | DiscountRule::Seasonal { rate, .. }
            | DiscountRule::Category { rate, .. }
            | DiscountRule::FlashSale { rate, .. }
            | DiscountRule::Loyalty { rate, .. } => Some(*rate),
        }
    }
}

/// The discount configuration file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountConfig {
    /// Default discount rate (0 to 1).
    pub discount_rate: Decimal,
    /// Totals must exceed this amount for the default rule to apply.
    pub min_purchase_amount: Decimal,
    /// Member adjustments for the default rule.
    #[serde(default)]
    pub adjustments: Adjustments,
    /// Rules applied in order by [`crate::calculation::DiscountEngine::apply_rules`].
    #[serde(default)]
    pub rules: Vec<DiscountRule>,
}

impl DiscountConfig {
    /// Checks that every rate lies in `0..=1` and the minimum is not negative.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_rate("discount_rate", self.discount_rate)?;

        if self.min_purchase_amount < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "min_purchase_amount".to_string(),
                message: format!("{} must not be negative", self.min_purchase_amount),
            });
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(rate) = rule.rate() {
                ensure_rate(&format!("rules[{}].rate", index), rate)?;
            }
        }

        Ok(())
    }
}
