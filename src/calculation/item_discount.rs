//! Shared machinery for rules that reprice individual line items.
//!
//! Item-level rules select items with a predicate and scale the selected
//! prices by `(1 - rate)`. Selection runs over the whole cart before any
//! price is touched, so a missing field leaves the cart unmodified.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::EngineResult;
use crate::models::{Cart, ItemId, LineItem};

use super::discounted_price;

/// A price change made to one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ItemPriceChange {
    /// Position of the item in the cart.
    pub index: usize,
    /// The item's identifier, when it has one.
    pub item_id: Option<ItemId>,
    /// Price before the discount.
    pub price_before: Decimal,
    /// Price after the discount.
    pub price_after: Decimal,
}

/// Discounts every item for which `selects` returns true.
///
/// `selects` may fail when an item lacks a field the rule reads. Selected
/// items must carry a price.
pub(crate) fn discount_selected_items<C, F>(
    cart: &mut C,
    rate: Decimal,
    mut selects: F,
) -> EngineResult<Vec<ItemPriceChange>>
where
    C: Cart + ?Sized,
    F: FnMut(usize, &LineItem) -> EngineResult<bool>,
{
    let mut selected = Vec::new();
    for (index, item) in cart.items().iter().enumerate() {
        if selects(index, item)? {
            selected.push((index, item.require_price(index)?));
        }
    }

    let items = cart.items_mut();
    let changes = selected
        .into_iter()
        .map(|(index, price_before)| {
            let price_after = discounted_price(price_before, rate);
            items[index].price = Some(price_after);
            ItemPriceChange {
                index,
                item_id: items[index].item_id,
                price_before,
                price_after,
            }
        })
        .collect();

    Ok(changes)
}

/// Renders price changes for an audit step.
pub(crate) fn changes_json(changes: &[ItemPriceChange]) -> serde_json::Value {
    serde_json::Value::Array(
        changes
            .iter()
            .map(|change| {
                serde_json::json!({
                    "index": change.index,
                    "item_id": change.item_id,
                    "price_before": change.price_before.normalize().to_string(),
                    "price_after": change.price_after.normalize().to_string(),
                })
            })
            .collect(),
    )
}
