//! Basket service: cart mutation and read-side aggregation.

use crate::basket::session::{resolve, resolve_or_create, IssuedToken, SessionConfig, SessionToken};
use crate::basket::views::{BasketItemView, BasketSummary};
use crate::basket::Basket;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{BasketId, BasketItemId, ProductId};
use crate::money::{Currency, Money};
use kiosk_store::{SharedCache, Store};

/// Storefront basket operations over the shared entity cache.
///
/// Mutating calls run inside the Basket partition's cycle guard; read calls
/// work on committed snapshots and never block writers. All state lives in
/// the injected [`SharedCache`], so two services sharing a cache see the
/// same baskets.
#[derive(Debug, Clone)]
pub struct BasketService {
    cache: SharedCache,
    config: SessionConfig,
}

impl BasketService {
    /// Create a service with the default session configuration.
    pub fn new(cache: SharedCache) -> Self {
        Self::with_config(cache, SessionConfig::default())
    }

    /// Create a service with an explicit session configuration.
    pub fn with_config(cache: SharedCache, config: SessionConfig) -> Self {
        Self { cache, config }
    }

    /// The session configuration this service applies.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Add one unit of a product to the session's basket.
    ///
    /// Resolves the basket, creating one when the token resolves nothing
    /// (or always, under the legacy replace policy). An item for a product
    /// already in the basket has its quantity incremented; otherwise a new
    /// item is appended at quantity 1. The product id is not validated
    /// against the catalog.
    ///
    /// Returns the freshly issued token when a basket was minted; the
    /// caller must persist it client-side.
    pub fn add_item(
        &self,
        token: Option<&SessionToken>,
        product_id: &ProductId,
    ) -> Result<Option<IssuedToken>, CommerceError> {
        self.cache.with_store(|store: &mut Store<Basket>| {
            let (mut basket, issued) = resolve_or_create(store, token, &self.config)?;
            basket.add_product(product_id.clone());
            store.update(basket)?;
            store.commit()?;
            Ok(issued)
        })
    }

    /// Remove an item from the session's basket by item id.
    ///
    /// A missing basket or a missing item is a silent no-op; the partition
    /// is committed only when a removal actually occurred.
    pub fn remove_item(
        &self,
        token: Option<&SessionToken>,
        item_id: &BasketItemId,
    ) -> Result<(), CommerceError> {
        self.cache.with_store(|store: &mut Store<Basket>| {
            let Some(mut basket) = resolve(store, token) else {
                return Ok(());
            };
            if basket.remove_item(item_id) {
                store.update(basket)?;
                store.commit()?;
            }
            Ok(())
        })
    }

    /// List the session's basket joined against the product catalog.
    ///
    /// Produces one row per item whose product still exists, in basket
    /// order; items referencing a deleted product are silently omitted. An
    /// unresolvable session yields an empty list.
    pub fn list_items(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<Vec<BasketItemView>, CommerceError> {
        let baskets = Store::<Basket>::open(&self.cache)?;
        let Some(basket) = resolve(&baskets, token) else {
            return Ok(Vec::new());
        };

        let products = Store::<Product>::open(&self.cache)?;
        let views = basket
            .items
            .iter()
            .filter_map(|item| {
                let product = products.find(item.product_id.as_str()).ok()?;
                Some(BasketItemView {
                    item_id: item.id.clone(),
                    product_name: product.name.clone(),
                    image: product.image.clone(),
                    price: product.price,
                    quantity: item.quantity,
                })
            })
            .collect();
        Ok(views)
    }

    /// Aggregate count and total for the session's basket.
    ///
    /// Both figures are computed over items whose product still exists; an
    /// unresolvable or empty basket summarizes to zero values, not absence.
    pub fn summary(&self, token: Option<&SessionToken>) -> Result<BasketSummary, CommerceError> {
        let baskets = Store::<Basket>::open(&self.cache)?;
        let Some(basket) = resolve(&baskets, token) else {
            return Ok(BasketSummary::empty());
        };

        let products = Store::<Product>::open(&self.cache)?;
        let mut item_count = 0_i64;
        let mut total: Option<Money> = None;

        for item in &basket.items {
            if let Ok(product) = products.find(item.product_id.as_str()) {
                let line = product
                    .price
                    .try_multiply(item.quantity)
                    .ok_or(CommerceError::Overflow)?;
                total = Some(match total {
                    Some(sum) => sum.try_add(&line).ok_or(CommerceError::Overflow)?,
                    None => line,
                });
                item_count += item.quantity;
            }
        }

        Ok(BasketSummary {
            item_count,
            total: total.unwrap_or_else(|| Money::zero(Currency::default())),
        })
    }

    /// Delete baskets whose last activity predates the token validity
    /// window, and return their ids.
    ///
    /// The store never expires anything on its own; callers schedule this
    /// sweep themselves. A deployment that never sweeps keeps orphaned
    /// baskets for the process lifetime.
    pub fn sweep_expired(&self, now: i64) -> Result<Vec<BasketId>, CommerceError> {
        let ttl_secs = self.config.token_ttl_secs;
        self.cache.with_store(|store: &mut Store<Basket>| {
            let stale: Vec<BasketId> = store
                .collection()
                .iter()
                .filter(|basket| basket.is_stale(now, ttl_secs))
                .map(|basket| basket.id.clone())
                .collect();

            if stale.is_empty() {
                return Ok(stale);
            }
            for id in &stale {
                store.delete(id.as_str())?;
            }
            store.commit()?;

            tracing::info!("evicted {} stale baskets", stale.len());
            Ok(stale)
        })
    }
}
