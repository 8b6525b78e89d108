//! Calculation logic for the Discount Engine.
//!
//! This module contains one function per discount rule: the default
//! percentage-off rule, bulk, seasonal, category, flash sale and loyalty
//! discounts. [`DiscountEngine`] wraps them behind a configured facade.

mod bulk_discount;
mod category_discount;
mod engine;
mod flash_sale_discount;
mod item_discount;
mod loyalty_discount;
mod percentage_discount;
mod seasonal_discount;

use rust_decimal::Decimal;

pub use bulk_discount::{BULK_DISCOUNT_RULE_ID, apply_bulk_discount};
pub use category_discount::{CATEGORY_DISCOUNT_RULE_ID, apply_category_discount};
pub use engine::DiscountEngine;
pub use flash_sale_discount::{FLASH_SALE_DISCOUNT_RULE_ID, apply_flash_sale_discount};
pub use loyalty_discount::{LOYALTY_DISCOUNT_RULE_ID, apply_loyalty_discount};
pub use percentage_discount::{
    ELECTRONICS_CATEGORY, PERCENTAGE_DISCOUNT_RULE_ID, PercentageBranch,
    apply_percentage_discount, select_branch,
};
pub use seasonal_discount::{HOLIDAY_SEASON, SEASONAL_DISCOUNT_RULE_ID, apply_seasonal_discount};

/// Scales `price` by `(1 - rate)`.
pub(crate) fn discounted_price(price: Decimal, rate: Decimal) -> Decimal {
    price * (Decimal::ONE - rate)
}
