//! Percentage-off discount calculation.
//!
//! This is the engine's default rule. It works on the cart's computed total
//! and branches on the customer kind, so premium and prime members receive
//! fixed adjustments on top of the percentage discount.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::Adjustments;
use crate::error::{EngineResult, ensure_rate, overflow};
use crate::models::{AuditStep, Cart, LineItem, UserType};

use super::discounted_price;

/// Rule identifier recorded in audit steps.
pub const PERCENTAGE_DISCOUNT_RULE_ID: &str = "percentage_discount";

/// Category that triggers the premium electronics adjustment.
pub const ELECTRONICS_CATEGORY: &str = "electronics";

/// Which pricing path the percentage rule took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentageBranch {
    /// Total did not exceed the minimum purchase amount.
    BelowMinimum,
    /// Premium customer with at least one electronics item.
    PremiumElectronics,
    /// Prime customer.
    Prime,
    /// Every other customer, premium without electronics included: the rate
    /// is applied as a markup.
    Default,
}

impl PercentageBranch {
    /// Returns the name recorded in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            PercentageBranch::BelowMinimum => "below_minimum",
            PercentageBranch::PremiumElectronics => "premium_electronics",
            PercentageBranch::Prime => "prime",
            PercentageBranch::Default => "default",
        }
    }
}

/// Selects the pricing path for a cart whose computed total is `total`.
pub fn select_branch(
    user_type: UserType,
    items: &[LineItem],
    total: Decimal,
    min_purchase_amount: Decimal,
) -> PercentageBranch {
    if total <= min_purchase_amount {
        return PercentageBranch::BelowMinimum;
    }

    match user_type {
        UserType::Premium if has_electronics(items) => PercentageBranch::PremiumElectronics,
        UserType::Prime => PercentageBranch::Prime,
        UserType::Premium | UserType::Regular | UserType::Loyal | UserType::Other => {
            PercentageBranch::Default
        }
    }
}

fn has_electronics(items: &[LineItem]) -> bool {
    items
        .iter()
        .any(|item| item.is_in_category(ELECTRONICS_CATEGORY))
}

/// Applies the percentage-off rule to a cart's total price.
///
/// The computed total must exceed `min_purchase_amount`; otherwise the
/// recorded total is left as it was. Above the minimum:
///
/// - Premium with electronics: `total * (1 - rate) + premium_electronics`
/// - Prime: `total * (1 - rate) + prime`
/// - Everyone else, premium without electronics included: `total * (1 + rate)`
///
/// A result outside the range of `Decimal` fails with
/// [`EngineError::ArithmeticOverflow`](crate::error::EngineError::ArithmeticOverflow)
/// and leaves the cart untouched.
///
/// # Examples
///
/// ```
/// use discount_engine::calculation::apply_percentage_discount;
/// use discount_engine::config::Adjustments;
/// use discount_engine::models::{Cart, LineItem, ShoppingCart, UserType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut cart = ShoppingCart::new(UserType::Premium).with_item(
///     LineItem::new()
///         .with_category("electronics")
///         .with_price(Decimal::new(100, 0)),
/// );
///
/// let step = apply_percentage_discount(
///     &mut cart,
///     Decimal::from_str("0.1").unwrap(),
///     Decimal::new(50, 0),
///     &Adjustments::default(),
///     1,
/// )
/// .unwrap();
///
/// assert!(step.applied);
/// assert_eq!(cart.total_price(), Decimal::new(415, 0));
/// ```
pub fn apply_percentage_discount<C: Cart + ?Sized>(
    cart: &mut C,
    discount_rate: Decimal,
    min_purchase_amount: Decimal,
    adjustments: &Adjustments,
    step_number: u32,
) -> EngineResult<AuditStep> {
    ensure_rate("discount_rate", discount_rate)?;

    let total = cart.calculate_total_price()?;
    let user_type = cart.user_type();
    let branch = select_branch(user_type, cart.items(), total, min_purchase_amount);
    let discounted = discounted_price(total, discount_rate);

    let input = serde_json::json!({
        "computed_total": total.normalize().to_string(),
        "user_type": user_type.as_str(),
        "discount_rate": discount_rate.normalize().to_string(),
        "min_purchase_amount": min_purchase_amount.normalize().to_string()
    });

    let (new_total, reasoning) = match branch {
        PercentageBranch::BelowMinimum => {
            let unchanged = cart.total_price();
            debug!(
                total = %total,
                min_purchase_amount = %min_purchase_amount,
                "Percentage discount skipped: minimum purchase not exceeded"
            );
            return Ok(AuditStep {
                step_number,
                rule_id: PERCENTAGE_DISCOUNT_RULE_ID.to_string(),
                rule_name: "Percentage Discount".to_string(),
                applied: false,
                input,
                output: serde_json::json!({
                    "branch": branch.as_str(),
                    "total_price": unchanged.normalize().to_string()
                }),
                reasoning: format!(
                    "Total ${} does not exceed minimum purchase ${}; total unchanged",
                    total.normalize(),
                    min_purchase_amount.normalize()
                ),
            });
        }
        PercentageBranch::PremiumElectronics => {
            let adjusted = discounted
                .checked_add(adjustments.premium_electronics)
                .ok_or_else(|| overflow("adding the premium electronics adjustment"))?;
            (
                adjusted,
                format!(
                    "${} x (1 - {}) + ${} premium electronics adjustment = ${}",
                    total.normalize(),
                    discount_rate.normalize(),
                    adjustments.premium_electronics.normalize(),
                    adjusted.normalize()
                ),
            )
        }
        PercentageBranch::Prime => {
            let adjusted = discounted
                .checked_add(adjustments.prime)
                .ok_or_else(|| overflow("adding the prime adjustment"))?;
            (
                adjusted,
                format!(
                    "${} x (1 - {}) + ${} prime adjustment = ${}",
                    total.normalize(),
                    discount_rate.normalize(),
                    adjustments.prime.normalize(),
                    adjusted.normalize()
                ),
            )
        }
        PercentageBranch::Default => {
            let marked_up = total
                .checked_mul(Decimal::ONE + discount_rate)
                .ok_or_else(|| overflow("marking up the cart total"))?;
            (
                marked_up,
                format!(
                    "${} x (1 + {}) = ${} for {} customer",
                    total.normalize(),
                    discount_rate.normalize(),
                    marked_up.normalize(),
                    user_type.as_str()
                ),
            )
        }
    };

    cart.set_total_price(new_total);
    debug!(
        branch = branch.as_str(),
        total = %total,
        new_total = %new_total,
        "Percentage discount applied"
    );

    Ok(AuditStep {
        step_number,
        rule_id: PERCENTAGE_DISCOUNT_RULE_ID.to_string(),
        rule_name: "Percentage Discount".to_string(),
        applied: true,
        input,
        output: serde_json::json!({
            "branch": branch.as_str(),
            "total_price": new_total.normalize().to_string()
        }),
        reasoning,
    })
}
