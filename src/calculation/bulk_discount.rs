//! Bulk purchase discount calculation.
//!
//! Items bought in large enough quantities have their unit price reduced.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineResult, ensure_rate};
use crate::models::{AuditStep, Cart};

use super::item_discount::{changes_json, discount_selected_items};

/// Rule identifier recorded in audit steps.
pub const BULK_DISCOUNT_RULE_ID: &str = "bulk_discount";

/// Discounts every item whose quantity reaches `bulk_quantity`.
///
/// Each item must carry a quantity, and each qualifying item a price.
/// Items below the threshold keep their price.
///
/// # Examples
///
/// ```
/// use discount_engine::calculation::apply_bulk_discount;
/// use discount_engine::models::{LineItem, ShoppingCart, UserType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut cart = ShoppingCart::new(UserType::Regular)
///     .with_item(LineItem::new().with_quantity(10).with_price(Decimal::new(100, 0)))
///     .with_item(LineItem::new().with_quantity(2).with_price(Decimal::new(100, 0)));
///
/// apply_bulk_discount(&mut cart, 5, Decimal::from_str("0.1").unwrap(), 1).unwrap();
/// assert_eq!(cart.items[0].price, Some(Decimal::new(90, 0)));
/// assert_eq!(cart.items[1].price, Some(Decimal::new(100, 0)));
/// ```
pub fn apply_bulk_discount<C: Cart + ?Sized>(
    cart: &mut C,
    bulk_quantity: u32,
    bulk_discount_rate: Decimal,
    step_number: u32,
) -> EngineResult<AuditStep> {
    ensure_rate("bulk_discount_rate", bulk_discount_rate)?;

    let changes = discount_selected_items(cart, bulk_discount_rate, |index, item| {
        Ok(item.require_quantity(index)? >= bulk_quantity)
    })?;

    debug!(
        bulk_quantity,
        rate = %bulk_discount_rate,
        discounted_items = changes.len(),
        "Bulk discount evaluated"
    );

    let reasoning = if changes.is_empty() {
        format!("No item has a quantity of at least {}", bulk_quantity)
    } else {
        format!(
            "{} item(s) with quantity >= {} discounted by {}",
            changes.len(),
            bulk_quantity,
            bulk_discount_rate.normalize()
        )
    };

    Ok(AuditStep {
        step_number,
        rule_id: BULK_DISCOUNT_RULE_ID.to_string(),
        rule_name: "Bulk Discount".to_string(),
        applied: !changes.is_empty(),
        input: serde_json::json!({
            "bulk_quantity": bulk_quantity,
            "bulk_discount_rate": bulk_discount_rate.normalize().to_string()
        }),
        output: serde_json::json!({ "changes": changes_json(&changes) }),
        reasoning,
    })
}
