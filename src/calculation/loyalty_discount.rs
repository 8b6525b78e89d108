//! Loyalty discount calculation.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineResult, ensure_rate};
use crate::models::{AuditStep, Cart, UserType};

use super::discounted_price;

/// Rule identifier recorded in audit steps.
pub const LOYALTY_DISCOUNT_RULE_ID: &str = "loyalty_discount";

/// Discounts the cart total for loyal customers.
///
/// Only carts whose user type is [`UserType::Loyal`] are discounted; the
/// total becomes the computed total scaled by `(1 - loyalty_discount_rate)`.
/// `loyalty_years` is recorded in the audit step but does not affect
/// eligibility or the rate.
pub fn apply_loyalty_discount<C: Cart + ?Sized>(
    cart: &mut C,
    loyalty_years: u32,
    loyalty_discount_rate: Decimal,
    step_number: u32,
) -> EngineResult<AuditStep> {
    ensure_rate("loyalty_discount_rate", loyalty_discount_rate)?;

    let user_type = cart.user_type();
    let input = serde_json::json!({
        "user_type": user_type.as_str(),
        "loyalty_years": loyalty_years,
        "loyalty_discount_rate": loyalty_discount_rate.normalize().to_string()
    });

    if user_type != UserType::Loyal {
        debug!(user_type = user_type.as_str(), "Loyalty discount skipped");
        return Ok(AuditStep {
            step_number,
            rule_id: LOYALTY_DISCOUNT_RULE_ID.to_string(),
            rule_name: "Loyalty Discount".to_string(),
            applied: false,
            input,
            output: serde_json::json!({
                "total_price": cart.total_price().normalize().to_string()
            }),
            reasoning: format!(
                "No loyalty discount - customer is {} (not loyal)",
                user_type.as_str()
            ),
        });
    }

    let total = cart.calculate_total_price()?;
    let new_total = discounted_price(total, loyalty_discount_rate);
    cart.set_total_price(new_total);
    debug!(
        loyalty_years,
        total = %total,
        new_total = %new_total,
        "Loyalty discount applied"
    );

    Ok(AuditStep {
        step_number,
        rule_id: LOYALTY_DISCOUNT_RULE_ID.to_string(),
        rule_name: "Loyalty Discount".to_string(),
        applied: true,
        input,
        output: serde_json::json!({
            "computed_total": total.normalize().to_string(),
            "total_price": new_total.normalize().to_string()
        }),
        reasoning: format!(
            "${} x (1 - {}) = ${}",
            total.normalize(),
            loyalty_discount_rate.normalize(),
            new_total.normalize()
        ),
    })
}
