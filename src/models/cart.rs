//! Cart abstraction and the default in-memory cart.
//!
//! Discount rules never construct carts. They operate on anything that
//! implements [`Cart`], which lets callers plug in their own basket types
//! (or test doubles with a fixed computed total).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, overflow};

use super::LineItem;

/// The kind of customer owning a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// A customer without any membership.
    #[default]
    Regular,
    /// Premium membership.
    Premium,
    /// Prime membership.
    Prime,
    /// Long-standing customer eligible for loyalty discounts.
    Loyal,
    /// Any other customer kind.
    #[serde(other)]
    Other,
}

impl UserType {
    /// Returns the wire name of the user type.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Regular => "regular",
            UserType::Premium => "premium",
            UserType::Prime => "prime",
            UserType::Loyal => "loyal",
            UserType::Other => "other",
        }
    }
}

/// Capabilities a discount rule needs from a shopping cart.
pub trait Cart {
    /// The kind of customer owning the cart.
    fn user_type(&self) -> UserType;

    /// The cart's line items, in order.
    fn items(&self) -> &[LineItem];

    /// Mutable access to the cart's line items.
    fn items_mut(&mut self) -> &mut [LineItem];

    /// The currently recorded total price.
    fn total_price(&self) -> Decimal;

    /// Overwrites the recorded total price.
    fn set_total_price(&mut self, total: Decimal);

    /// Computes the current sum of item prices.
    ///
    /// Fails with [`EngineError::ArithmeticOverflow`](crate::error::EngineError::ArithmeticOverflow)
    /// when the sum does not fit in a `Decimal`.
    fn calculate_total_price(&self) -> EngineResult<Decimal>;
}

/// A plain in-memory shopping cart.
///
/// # Examples
///
/// ```
/// use discount_engine::models::{Cart, LineItem, ShoppingCart, UserType};
/// use rust_decimal::Decimal;
///
/// let cart = ShoppingCart::new(UserType::Regular)
///     .with_item(LineItem::new().with_price(Decimal::new(40, 0)).with_quantity(2))
///     .with_item(LineItem::new().with_price(Decimal::new(20, 0)));
///
/// assert_eq!(cart.calculate_total_price().unwrap(), Decimal::new(100, 0));
/// assert_eq!(cart.total_price(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCart {
    /// The kind of customer owning the cart.
    #[serde(default)]
    pub user_type: UserType,
    /// Line items in the cart.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// The recorded total price.
    #[serde(default)]
    pub total_price: Decimal,
}

impl ShoppingCart {
    /// Creates an empty cart for the given customer kind.
    pub fn new(user_type: UserType) -> Self {
        Self {
            user_type,
            ..Self::default()
        }
    }

    /// Appends a line item.
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Sets the recorded total price.
    pub fn with_total_price(mut self, total: Decimal) -> Self {
        self.total_price = total;
        self
    }
}

impl Cart for ShoppingCart {
    fn user_type(&self) -> UserType {
        self.user_type
    }

    fn items(&self) -> &[LineItem] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut [LineItem] {
        &mut self.items
    }

    fn total_price(&self) -> Decimal {
        self.total_price
    }

    fn set_total_price(&mut self, total: Decimal) {
        self.total_price = total;
    }

    fn calculate_total_price(&self) -> EngineResult<Decimal> {
        self.items
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |total, (index, item)| {
                item.line_total()
                    .and_then(|line_total| total.checked_add(line_total))
                    .ok_or_else(|| overflow(format!("summing line item {index}")))
            })
    }
}
