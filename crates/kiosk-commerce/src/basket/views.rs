//! Read-side view rows produced by the basket service.

use crate::ids::BasketItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One basket line joined with its product, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BasketItemView {
    /// Basket item id, used for removal.
    pub item_id: BasketItemId,
    /// Product name at read time.
    pub product_name: String,
    /// Product image reference.
    pub image: String,
    /// Unit price at read time.
    pub price: Money,
    /// Quantity in the basket.
    pub quantity: i64,
}

/// Aggregate basket figures for the storefront header.
///
/// Both fields are zero-valued, never absent: a missing or empty basket
/// summarizes to zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BasketSummary {
    /// Sum of quantities over items whose product still exists.
    pub item_count: i64,
    /// Sum of quantity times unit price over the same items.
    pub total: Money,
}

impl BasketSummary {
    /// The zero summary.
    pub fn empty() -> Self {
        Self {
            item_count: 0,
            total: Money::zero(Currency::default()),
        }
    }
}

impl Default for BasketSummary {
    fn default() -> Self {
        Self::empty()
    }
}
