//! Flash sale discount calculation.
//!
//! A flash sale discounts a fixed list of products, identified by item id.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineResult, ensure_rate};
use crate::models::{AuditStep, Cart, ItemId};

use super::item_discount::{changes_json, discount_selected_items};

/// Rule identifier recorded in audit steps.
pub const FLASH_SALE_DISCOUNT_RULE_ID: &str = "flash_sale_discount";

/// Discounts every item whose id appears in `items_on_sale`.
///
/// Each item must carry an id, and each item on sale a price.
///
/// # Examples
///
/// ```
/// use discount_engine::calculation::apply_flash_sale_discount;
/// use discount_engine::models::{LineItem, ShoppingCart, UserType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut cart = ShoppingCart::new(UserType::Regular)
///     .with_item(LineItem::new().with_item_id(1).with_price(Decimal::new(100, 0)));
///
/// apply_flash_sale_discount(&mut cart, Decimal::from_str("0.2").unwrap(), &[1], 1).unwrap();
/// assert_eq!(cart.items[0].price, Some(Decimal::new(80, 0)));
/// ```
pub fn apply_flash_sale_discount<C: Cart + ?Sized>(
    cart: &mut C,
    flash_sale_rate: Decimal,
    items_on_sale: &[ItemId],
    step_number: u32,
) -> EngineResult<AuditStep> {
    ensure_rate("flash_sale_rate", flash_sale_rate)?;

    let changes = discount_selected_items(cart, flash_sale_rate, |index, item| {
        Ok(items_on_sale.contains(&item.require_item_id(index)?))
    })?;

    debug!(
        rate = %flash_sale_rate,
        items_on_sale = items_on_sale.len(),
        discounted_items = changes.len(),
        "Flash sale discount evaluated"
    );

    Ok(AuditStep {
        step_number,
        rule_id: FLASH_SALE_DISCOUNT_RULE_ID.to_string(),
        rule_name: "Flash Sale Discount".to_string(),
        applied: !changes.is_empty(),
        input: serde_json::json!({
            "flash_sale_rate": flash_sale_rate.normalize().to_string(),
            "items_on_sale": items_on_sale
        }),
        output: serde_json::json!({ "changes": changes_json(&changes) }),
        reasoning: format!(
            "{} item(s) on flash sale discounted by {}",
            changes.len(),
            flash_sale_rate.normalize()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{LineItem, ShoppingCart, UserType};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn cart_with_item_one() -> ShoppingCart {
        ShoppingCart::new(UserType::Regular)
            .with_item(LineItem::new().with_item_id(1).with_price(dec("100")))
    }

    #[test]
    fn test_item_on_sale_is_discounted() {
        let mut cart = cart_with_item_one();
        let step = apply_flash_sale_discount(&mut cart, dec("0.2"), &[1], 1).unwrap();

        assert_eq!(cart.items[0].price, Some(dec("80.0")));
        assert!(step.applied);
        assert_eq!(step.input["items_on_sale"][0], 1);
    }

    #[test]
    fn test_item_not_on_sale_is_untouched() {
        let mut cart = cart_with_item_one();
        let step = apply_flash_sale_discount(&mut cart, dec("0.2"), &[2], 1).unwrap();

        assert_eq!(cart.items[0].price, Some(dec("100.0")));
        assert!(!step.applied);
    }

    #[test]
    fn test_empty_sale_list_discounts_nothing() {
        let mut cart = cart_with_item_one();
        apply_flash_sale_discount(&mut cart, dec("0.2"), &[], 1).unwrap();

        assert_eq!(cart.items[0].price, Some(dec("100")));
    }

    #[test]
    fn test_missing_item_id_is_reported() {
        let mut cart = cart_with_item_one().with_item(LineItem::new().with_price(dec("10")));
        let result = apply_flash_sale_discount(&mut cart, dec("0.2"), &[1], 1);

        assert!(matches!(
            result,
            Err(EngineError::MissingItemField {
                index: 1,
                field: "item_id"
            })
        ));
        assert_eq!(cart.items[0].price, Some(dec("100")));
    }

    #[test]
    fn test_item_on_sale_without_price_is_reported() {
        let mut cart = ShoppingCart::new(UserType::Regular).with_item(LineItem::new().with_item_id(1));
        let result = apply_flash_sale_discount(&mut cart, dec("0.2"), &[1], 1);

        assert!(matches!(
            result,
            Err(EngineError::MissingItemField {
                index: 0,
                field: "price"
            })
        ));
    }
}
