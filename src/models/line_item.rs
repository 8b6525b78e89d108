//! Line item model.
//!
//! A line item is one entry in a cart. Every field is optional: which fields
//! must be present depends on the discount rule being applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Identifier of a product line in a cart.
pub type ItemId = u64;

/// Represents a single entry in a shopping cart.
///
/// # Examples
///
/// ```
/// use discount_engine::models::LineItem;
/// use rust_decimal::Decimal;
///
/// let item = LineItem::new()
///     .with_item_id(1)
///     .with_category("clothing")
///     .with_price(Decimal::new(100, 0))
///     .with_quantity(2);
/// assert_eq!(item.line_total(), Some(Decimal::new(200, 0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Identifier of the product this line refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    /// Product category (e.g., "electronics", "clothing").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Number of units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl LineItem {
    /// Creates a line item with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item identifier.
    pub fn with_item_id(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the unit price.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Returns true if this item belongs to the given category.
    pub fn is_in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    /// Price multiplied by quantity.
    ///
    /// A missing quantity counts as one unit and a missing price as zero.
    /// Returns `None` if the product does not fit in a `Decimal`.
    pub fn line_total(&self) -> Option<Decimal> {
        let price = self.price.unwrap_or(Decimal::ZERO);
        let quantity = Decimal::from(self.quantity.unwrap_or(1));
        price.checked_mul(quantity)
    }

    pub(crate) fn require_price(&self, index: usize) -> EngineResult<Decimal> {
        self.price.ok_or(EngineError::MissingItemField {
            index,
            field: "price",
        })
    }

    pub(crate) fn require_quantity(&self, index: usize) -> EngineResult<u32> {
        self.quantity.ok_or(EngineError::MissingItemField {
            index,
            field: "quantity",
        })
    }

    pub(crate) fn require_category(&self, index: usize) -> EngineResult<&str> {
        self.category
            .as_deref()
            .ok_or(EngineError::MissingItemField {
                index,
                field: "category",
            })
    }

    pub(crate) fn require_item_id(&self, index: usize) -> EngineResult<ItemId> {
        self.item_id.ok_or(EngineError::MissingItemField {
            index,
            field: "item_id",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_partial_item() {
        let json = r#"{ "category": "electronics" }"#;

        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category.as_deref(), Some("electronics"));
        assert_eq!(item.price, None);
        assert_eq!(item.quantity, None);
        assert_eq!(item.item_id, None);
    }

    #[test]
    fn test_deserialize_full_item() {
        let json = r#"{
            "item_id": 7,
            "category": "clothing",
            "price": "19.99",
            "quantity": 3
        }"#;

        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_id, Some(7));
        assert_eq!(item.price, Some(dec("19.99")));
        assert_eq!(item.quantity, Some(3));
    }

    #[test]
    fn test_serialize_skips_missing_fields() {
        let item = LineItem::new().with_item_id(1);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"item_id":1}"#);
    }

    #[test]
    fn test_line_total_multiplies_price_by_quantity() {
        let item = LineItem::new().with_price(dec("12.50")).with_quantity(4);
        assert_eq!(item.line_total(), Some(dec("50.00")));
    }

    #[test]
    fn test_line_total_defaults_quantity_to_one() {
        let item = LineItem::new().with_price(dec("12.50"));
        assert_eq!(item.line_total(), Some(dec("12.50")));
    }

    #[test]
    fn test_line_total_without_price_is_zero() {
        let item = LineItem::new().with_quantity(4);
        assert_eq!(item.line_total(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let item = LineItem::new().with_price(Decimal::MAX).with_quantity(2);
        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn test_is_in_category() {
        let item = LineItem::new().with_category("clothing");
        assert!(item.is_in_category("clothing"));
        assert!(!item.is_in_category("electronics"));
        assert!(!LineItem::new().is_in_category("clothing"));
    }

    #[test]
    fn test_require_price_reports_index() {
        let result = LineItem::new().require_price(3);
        match result {
            Err(EngineError::MissingItemField { index, field }) => {
                assert_eq!(index, 3);
                assert_eq!(field, "price");
            }
            _ => panic!("Expected MissingItemField error"),
        }
    }
}
