//! Storefront domain logic for Kiosk.
//!
//! This crate provides the catalog and basket core of a small online shop:
//!
//! - **Catalog**: products and categories, stored generically through
//!   [`kiosk_store`]
//! - **Basket**: session-bound shopping baskets with idempotent item
//!   aggregation and read-side price summaries
//!
//! # Example
//!
//! ```rust,ignore
//! use kiosk_commerce::prelude::*;
//! use kiosk_store::{SharedCache, Store};
//!
//! let cache = SharedCache::new();
//!
//! // Seed the catalog.
//! let mut products = Store::<Product>::open(&cache)?;
//! let tea = Product::new("Oolong Tea", Money::from_decimal(5.00, Currency::USD));
//! products.insert(tea.clone());
//! products.commit()?;
//!
//! // Shop against it.
//! let baskets = BasketService::new(cache.clone());
//! let issued = baskets.add_item(None, &tea.id)?;
//! let token = issued.map(|grant| grant.token);
//!
//! let summary = baskets.summary(token.as_ref())?;
//! println!("{} items, {}", summary.item_count, summary.total);
//! ```

pub mod basket;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod money;

pub use error::CommerceError;
pub use ids::{BasketId, BasketItemId, CategoryId, ProductId};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::basket::{
        Basket, BasketItem, BasketItemView, BasketService, BasketSummary, CreatePolicy,
        IssuedToken, SessionConfig, SessionToken, BASKET_COOKIE, TOKEN_TTL_SECS,
    };
    pub use crate::catalog::{Category, Product};
    pub use crate::error::CommerceError;
    pub use crate::ids::{BasketId, BasketItemId, CategoryId, ProductId};
    pub use crate::money::{Currency, Money};
}
