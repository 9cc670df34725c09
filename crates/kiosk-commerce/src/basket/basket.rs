//! Basket and basket item types.

use crate::ids::{BasketId, BasketItemId, ProductId};
use kiosk_store::Entity;
use serde::{Deserialize, Serialize};

/// A shopper's basket, identified independently of any session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Basket {
    /// Unique basket identifier. The session token is bound to this.
    pub id: BasketId,
    /// Items in the basket, in the order they were first added.
    pub items: Vec<BasketItem>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last mutation. Drives the eviction sweep.
    pub updated_at: i64,
}

impl Basket {
    /// Create a new empty basket.
    pub fn new() -> Self {
        let now = current_timestamp();
        Self {
            id: BasketId::generate(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add one unit of a product.
    ///
    /// A basket holds at most one item per product: adding a product that
    /// is already present increments that item's quantity, otherwise a new
    /// item is appended at quantity 1. Returns the id of the affected item.
    pub fn add_product(&mut self, product_id: ProductId) -> BasketItemId {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity = existing.quantity.saturating_add(1);
            let id = existing.id.clone();
            self.touch();
            return id;
        }

        let item = BasketItem::new(self.id.clone(), product_id);
        let id = item.id.clone();
        self.items.push(item);
        self.touch();
        id
    }

    /// Remove an item by id. Returns `true` if an item was removed.
    pub fn remove_item(&mut self, item_id: &BasketItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if the basket has been idle for at least `ttl_secs`.
    pub fn is_stale(&self, now: i64, ttl_secs: i64) -> bool {
        now.saturating_sub(self.updated_at) >= ttl_secs
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

impl Default for Basket {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Basket {
    const KIND: &'static str = "Basket";

    fn id(&self) -> &str {
        self.id.as_str()
    }
}

/// A line in a basket, referencing a product by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BasketItem {
    /// Unique item identifier.
    pub id: BasketItemId,
    /// Back-reference to the owning basket.
    pub basket_id: BasketId,
    /// The product this line refers to. Soft reference: the product may be
    /// deleted independently; read-side joins drop such lines.
    pub product_id: ProductId,
    /// Quantity, always at least 1.
    pub quantity: i64,
}

impl BasketItem {
    /// Create a new item at quantity 1.
    pub fn new(basket_id: BasketId, product_id: ProductId) -> Self {
        Self {
            id: BasketItemId::generate(),
            basket_id,
            product_id,
            quantity: 1,
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
