//! Seasonal discount calculation.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineResult, ensure_rate};
use crate::models::{AuditStep, Cart};

use super::discounted_price;

/// Rule identifier recorded in audit steps.
pub const SEASONAL_DISCOUNT_RULE_ID: &str = "seasonal_discount";

/// The only season that triggers the seasonal discount.
pub const HOLIDAY_SEASON: &str = "holiday";

/// Discounts the cart total during the holiday season.
///
/// When `season` is exactly `"holiday"` the total price becomes the computed
/// total scaled by `(1 - seasonal_discount_rate)`. Any other season leaves
/// the recorded total as it was, without recomputing it.
pub fn apply_seasonal_discount<C: Cart + ?Sized>(
    cart: &mut C,
    season: &str,
    seasonal_discount_rate: Decimal,
    step_number: u32,
) -> EngineResult<AuditStep> {
    ensure_rate("seasonal_discount_rate", seasonal_discount_rate)?;

    let input = serde_json::json!({
        "season": season,
        "seasonal_discount_rate": seasonal_discount_rate.normalize().to_string()
    });

    if season != HOLIDAY_SEASON {
        debug!(season, "Seasonal discount skipped");
        return Ok(AuditStep {
            step_number,
            rule_id: SEASONAL_DISCOUNT_RULE_ID.to_string(),
            rule_name: "Seasonal Discount".to_string(),
            applied: false,
            input,
            output: serde_json::json!({
                "total_price": cart.total_price().normalize().to_string()
            }),
            reasoning: format!("Season '{}' is not '{}'", season, HOLIDAY_SEASON),
        });
    }

    let total = cart.calculate_total_price()?;
    let new_total = discounted_price(total, seasonal_discount_rate);
    cart.set_total_price(new_total);
    debug!(total = %total, new_total = %new_total, "Seasonal discount applied");

    Ok(AuditStep {
        step_number,
        rule_id: SEASONAL_DISCOUNT_RULE_ID.to_string(),
        rule_name: "Seasonal Discount".to_string(),
        applied: true,
        input,
        output: serde_json::json!({
            "computed_total": total.normalize().to_string(),
            "total_price": new_total.normalize().to_string()
        }),
        reasoning: format!(
            "${} x (1 - {}) = ${}",
            total.normalize(),
            seasonal_discount_rate.normalize(),
            new_total.normalize()
        ),
    })
}
