//! Category discount calculation.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineResult, ensure_rate};
use crate::models::{AuditStep, Cart};

use super::item_discount::{changes_json, discount_selected_items};

/// Rule identifier recorded in audit steps.
pub const CATEGORY_DISCOUNT_RULE_ID: &str = "category_discount";

/// Discounts every item in `category`.
///
/// Each item must carry a category, and each matching item a price.
/// Category comparison is exact.
pub fn apply_category_discount<C: Cart + ?Sized>(
    cart: &mut C,
    category: &str,
    category_discount_rate: Decimal,
    step_number: u32,
) -> EngineResult<AuditStep> {
    ensure_rate("category_discount_rate", category_discount_rate)?;

    let changes = discount_selected_items(cart, category_discount_rate, |index, item| {
        Ok(item.require_category(index)? == category)
    })?;

    debug!(
        category,
        rate = %category_discount_rate,
        discounted_items = changes.len(),
        "Category discount evaluated"
    );

    Ok(AuditStep {
        step_number,
        rule_id: CATEGORY_DISCOUNT_RULE_ID.to_string(),
        rule_name: "Category Discount".to_string(),
        applied: !changes.is_empty(),
        input: serde_json::json!({
            "category": category,
            "category_discount_rate": category_discount_rate.normalize().to_string()
        }),
        output: serde_json::json!({ "changes": changes_json(&changes) }),
        reasoning: format!(
            "{} item(s) in category '{}' discounted by {}",
            changes.len(),
            category,
            category_discount_rate.normalize()
        ),
    })
}
