//! The discount engine facade.
//!
//! [`DiscountEngine`] holds the default discount rate and minimum purchase
//! amount, and exposes one method per discount rule. Every method borrows the
//! cart mutably, changes either its total price or its item prices, and
//! returns an [`AuditStep`] describing the decision.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::config::{Adjustments, DiscountConfig, DiscountRule};
use crate::error::{EngineError, EngineResult, ensure_rate};
use crate::models::{AuditStep, AuditTrace, Cart, ItemId};

use super::{
    apply_bulk_discount, apply_category_discount, apply_flash_sale_discount,
    apply_loyalty_discount, apply_percentage_discount, apply_seasonal_discount,
};

/// Applies discount rules to carts.
///
/// # Example
///
/// ```
/// use discount_engine::calculation::DiscountEngine;
/// use discount_engine::models::{Cart, LineItem, ShoppingCart, UserType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let engine = DiscountEngine::new(Decimal::from_str("0.1").unwrap(), Decimal::new(50, 0))?;
/// let mut cart = ShoppingCart::new(UserType::Loyal)
///     .with_item(LineItem::new().with_price(Decimal::new(200, 0)));
///
/// engine.apply_loyalty_discount(&mut cart, 2, Decimal::from_str("0.1").unwrap())?;
/// assert_eq!(cart.total_price(), Decimal::new(180, 0));
/// # Ok::<(), discount_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountEngine {
    discount_rate: Decimal,
    min_purchase_amount: Decimal,
    adjustments: Adjustments,
}

impl DiscountEngine {
    /// Creates an engine with the default adjustments.
    ///
    /// Fails when `discount_rate` is outside `0..=1` or the minimum is
    /// negative.
    pub fn new(discount_rate: Decimal, min_purchase_amount: Decimal) -> EngineResult<Self> {
        Self::with_adjustments(discount_rate, min_purchase_amount, Adjustments::default())
    }

    /// Creates an engine with explicit premium/prime adjustments.
    pub fn with_adjustments(
        discount_rate: Decimal,
        min_purchase_amount: Decimal,
        adjustments: Adjustments,
    ) -> EngineResult<Self> {
        ensure_rate("discount_rate", discount_rate)?;
        if min_purchase_amount < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "min_purchase_amount".to_string(),
                message: format!("{} must not be negative", min_purchase_amount),
            });
        }

        Ok(Self {
            discount_rate,
            min_purchase_amount,
            adjustments,
        })
    }

    /// Creates an engine from loaded configuration.
    pub fn from_config(config: &DiscountConfig) -> EngineResult<Self> {
        Self::with_adjustments(
            config.discount_rate,
            config.min_purchase_amount,
            config.adjustments.clone(),
        )
    }

    /// The default discount rate.
    pub fn discount_rate(&self) -> Decimal {
        self.discount_rate
    }

    /// The minimum purchase amount the default rule requires.
    pub fn min_purchase_amount(&self) -> Decimal {
        self.min_purchase_amount
    }

    /// The premium/prime adjustments used by the default rule.
    pub fn adjustments(&self) -> &Adjustments {
        &self.adjustments
    }

    /// Applies the default percentage-off rule to the cart total.
    pub fn apply_discount<C: Cart + ?Sized>(&self, cart: &mut C) -> EngineResult<AuditStep> {
        apply_percentage_discount(
            cart,
            self.discount_rate,
            self.min_purchase_amount,
            &self.adjustments,
            1,
        )
    }

    /// Discounts items bought in at least `bulk_quantity` units.
    pub fn apply_bulk_discount<C: Cart + ?Sized>(
        &self,
        cart: &mut C,
        bulk_quantity: u32,
        bulk_discount_rate: Decimal,
    ) -> EngineResult<AuditStep> {
        apply_bulk_discount(cart, bulk_quantity, bulk_discount_rate, 1)
    }

    /// Discounts the cart total during the holiday season.
    pub fn apply_seasonal_discount<C: Cart + ?Sized>(
        &self,
        cart: &mut C,
        season: &str,
        seasonal_discount_rate: Decimal,
    ) -> EngineResult<AuditStep> {
        apply_seasonal_discount(cart, season, seasonal_discount_rate, 1)
    }

    /// Discounts items in one category.
    pub fn apply_category_discount<C: Cart + ?Sized>(
        &self,
        cart: &mut C,
        category: &str,
        category_discount_rate: Decimal,
    ) -> EngineResult<AuditStep> {
        apply_category_discount(cart, category, category_discount_rate, 1)
    }

    /// Discounts items whose id is on sale.
    pub fn apply_flash_sale_discount<C: Cart + ?Sized>(
        &self,
        cart: &mut C,
        flash_sale_rate: Decimal,
        items_on_sale: &[ItemId],
    ) -> EngineResult<AuditStep> {
        apply_flash_sale_discount(cart, flash_sale_rate, items_on_sale, 1)
    }

    /// Discounts the cart total for loyal customers.
    pub fn apply_loyalty_discount<C: Cart + ?Sized>(
        &self,
        cart: &mut C,
        loyalty_years: u32,
        loyalty_discount_rate: Decimal,
    ) -> EngineResult<AuditStep> {
        apply_loyalty_discount(cart, loyalty_years, loyalty_discount_rate, 1)
    }

    /// Applies a single configured rule, numbering its audit step.
    pub fn apply_rule<C: Cart + ?Sized>(
        &self,
        cart: &mut C,
        rule: &DiscountRule,
        step_number: u32,
    ) -> EngineResult<AuditStep> {
        match rule {
            DiscountRule::Percentage => apply_percentage_discount(
                cart,
                self.discount_rate,
                self.min_purchase_amount,
                &self.adjustments,
                step_number,
            ),
            DiscountRule::Bulk { quantity, rate } => {
                apply_bulk_discount(cart, *quantity, *rate, step_number)
            }
            DiscountRule::Seasonal { season, rate } => {
                apply_seasonal_discount(cart, season, *rate, step_number)
            }
            DiscountRule::Category { category, rate } => {
                apply_category_discount(cart, category, *rate, step_number)
            }
            DiscountRule::FlashSale { rate, items } => {
                apply_flash_sale_discount(cart, *rate, items, step_number)
            }
            DiscountRule::Loyalty { years, rate } => {
                apply_loyalty_discount(cart, *years, *rate, step_number)
            }
        }
    }

    /// Applies `rules` in order and collects their audit steps.
    ///
    /// Stops at the first failing rule; rules before it stay applied.
    pub fn apply_rules<C: Cart + ?Sized>(
        &self,
        cart: &mut C,
        rules: &[DiscountRule],
    ) -> EngineResult<AuditTrace> {
        let started = Instant::now();
        let trace_id = Uuid::new_v4();
        let total_before = cart.total_price();

        let steps = rules
            .iter()
            .zip(1u32..)
            .map(|(rule, step_number)| self.apply_rule(&mut *cart, rule, step_number))
            .collect::<EngineResult<Vec<_>>>()?;

        let trace = AuditTrace {
            trace_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            total_before,
            total_after: cart.total_price(),
            steps,
        };

        info!(
            trace_id = %trace.trace_id,
            rules = rules.len(),
            applied = trace.applied_count(),
            total_before = %trace.total_before,
            total_after = %trace.total_after,
            duration_us = started.elapsed().as_micros() as u64,
            "Discount rules applied"
        );

        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, ShoppingCart, UserType};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn engine() -> DiscountEngine {
        DiscountEngine::new(dec("0.1"), dec("50")).unwrap()
    }

    #[test]
    fn test_new_rejects_rate_above_one() {
        let result = DiscountEngine::new(dec("1.01"), dec("50"));
        assert!(matches!(result, Err(EngineError::InvalidRate { .. })));
    }

    #[test]
    fn test_new_rejects_negative_minimum() {
        let result = DiscountEngine::new(dec("0.1"), dec("-1"));
        match result {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "min_purchase_amount");
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_accessors_return_construction_values() {
        let engine = engine();
        assert_eq!(engine.discount_rate(), dec("0.1"));
        assert_eq!(engine.min_purchase_amount(), dec("50"));
        assert_eq!(engine.adjustments(), &Adjustments::default());
    }

    #[test]
    fn test_apply_rule_numbers_step() {
        let mut cart = ShoppingCart::new(UserType::Regular)
            .with_item(LineItem::new().with_quantity(10).with_price(dec("100")));
        let rule = DiscountRule::Bulk {
            quantity: 5,
            rate: dec("0.1"),
        };

        let step = engine().apply_rule(&mut cart, &rule, 4).unwrap();
        assert_eq!(step.step_number, 4);
        assert_eq!(cart.items[0].price, Some(dec("90")));
    }

    #[test]
    fn test_apply_rules_chains_item_and_total_rules() {
        let mut cart = ShoppingCart::new(UserType::Loyal)
            .with_item(
                LineItem::new()
                    .with_item_id(1)
                    .with_category("clothing")
                    .with_price(dec("100"))
                    .with_quantity(1),
            )
            .with_item(
                LineItem::new()
                    .with_item_id(2)
                    .with_category("books")
                    .with_price(dec("100"))
                    .with_quantity(1),
            );
        let rules = vec![
            DiscountRule::Category {
                category: "clothing".to_string(),
                rate: dec("0.2"),
            },
            DiscountRule::FlashSale {
                rate: dec("0.5"),
                items: vec![2],
            },
            DiscountRule::Loyalty {
                years: 5,
                rate: dec("0.1"),
            },
        ];

        let trace = engine().apply_rules(&mut cart, &rules).unwrap();

        // (80 + 50) * 0.9
        assert_eq!(cart.total_price, dec("117"));
        assert_eq!(trace.total_before, Decimal::ZERO);
        assert_eq!(trace.total_after, dec("117"));
        assert_eq!(trace.steps.len(), 3);
        assert_eq!(trace.applied_count(), 3);
        let numbers: Vec<u32> = trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(trace.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_apply_rules_stops_at_first_error() {
        let mut cart = ShoppingCart::new(UserType::Regular)
            .with_item(LineItem::new().with_category("clothing").with_price(dec("100")));
        let rules = vec![
            DiscountRule::Category {
                category: "clothing".to_string(),
                rate: dec("0.2"),
            },
            DiscountRule::Bulk {
                quantity: 5,
                rate: dec("0.1"),
            },
            DiscountRule::Seasonal {
                season: "holiday".to_string(),
                rate: dec("0.5"),
            },
        ];

        let result = engine().apply_rules(&mut cart, &rules);

        assert!(matches!(
            result,
            Err(EngineError::MissingItemField {
                index: 0,
                field: "quantity"
            })
        ));
        assert_eq!(cart.items[0].price, Some(dec("80")));
        assert_eq!(cart.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_apply_rules_with_no_rules_is_empty_trace() {
        let mut cart = ShoppingCart::new(UserType::Regular).with_total_price(dec("12"));
        let trace = engine().apply_rules(&mut cart, &[]).unwrap();

        assert!(trace.steps.is_empty());
        assert_eq!(trace.total_before, dec("12"));
        assert_eq!(trace.total_after, dec("12"));
    }

    #[test]
    fn test_engine_works_through_trait_object() {
        let mut cart = ShoppingCart::new(UserType::Regular)
            .with_item(LineItem::new().with_price(dec("100")));
        let dyn_cart: &mut dyn Cart = &mut cart;

        engine().apply_discount(dyn_cart).unwrap();
        assert_eq!(cart.total_price, dec("110"));
    }
}
