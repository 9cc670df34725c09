//! Session binding: resolving a client-held token to a basket.
//!
//! The token value is the bound basket id, so resolution is a lookup into
//! the Basket partition. The core never reads or writes cookies itself; it
//! publishes the cookie name and validity window for the delivery layer and
//! hands back an [`IssuedToken`] whenever a basket is minted.

use crate::basket::Basket;
use crate::error::CommerceError;
use crate::ids::BasketId;
use kiosk_store::Store;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cookie name the storefront stores the basket token under.
pub const BASKET_COOKIE: &str = "eCommerceBasket";

/// Default validity window for issued tokens: 1 day.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Opaque client-held token bound to a basket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// Create a token from a client-presented string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Bind a token to a basket id.
    pub fn for_basket(basket_id: &BasketId) -> Self {
        Self(basket_id.as_str().to_string())
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Token handed back to the caller after a basket was minted.
///
/// The caller persists it client-side (under [`SessionConfig::cookie_name`])
/// for `max_age_secs` seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The token to persist.
    pub token: SessionToken,
    /// Client-side validity window, in seconds.
    pub max_age_secs: i64,
}

/// What to do when a presented token already resolves a basket and creation
/// is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CreatePolicy {
    /// Reuse the resolved basket; create only when resolution fails.
    #[default]
    ReuseExisting,
    /// Mint a fresh basket even though the token resolved one, orphaning
    /// the old basket. Legacy storefront behavior.
    AlwaysReplace,
}

/// Session binding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie name the delivery layer stores the token under.
    pub cookie_name: String,
    /// Validity window for issued tokens, in seconds. Also the idle window
    /// used by the basket eviction sweep.
    pub token_ttl_secs: i64,
    /// Creation behavior when a valid token is presented.
    pub create_policy: CreatePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: BASKET_COOKIE.to_string(),
            token_ttl_secs: TOKEN_TTL_SECS,
            create_policy: CreatePolicy::default(),
        }
    }
}

/// Resolve a token to its basket without creating anything.
///
/// No token, or a token whose basket is gone, yields `None`. This never
/// fails: a stale token is indistinguishable from no token.
pub fn resolve(store: &Store<Basket>, token: Option<&SessionToken>) -> Option<Basket> {
    let token = token?;
    store.find(token.as_str()).ok().cloned()
}

/// Resolve a token to its basket, minting one according to the policy.
///
/// Returns the basket together with a freshly issued token whenever one was
/// minted; the caller must hand that token to the client. Minting inserts
/// the basket and commits the partition immediately.
pub fn resolve_or_create(
    store: &mut Store<Basket>,
    token: Option<&SessionToken>,
    config: &SessionConfig,
) -> Result<(Basket, Option<IssuedToken>), CommerceError> {
    if let Some(basket) = resolve(store, token) {
        if config.create_policy == CreatePolicy::AlwaysReplace {
            let (fresh, issued) = mint_basket(store, config)?;
            return Ok((fresh, Some(issued)));
        }
        return Ok((basket, None));
    }

    let (basket, issued) = mint_basket(store, config)?;
    Ok((basket, Some(issued)))
}

fn mint_basket(
    store: &mut Store<Basket>,
    config: &SessionConfig,
) -> Result<(Basket, IssuedToken), CommerceError> {
    let basket = Basket::new();
    store.insert(basket.clone());
    store.commit()?;

    tracing::debug!("minted basket {}", basket.id);

    let issued = IssuedToken {
        token: SessionToken::for_basket(&basket.id),
        max_age_secs: config.token_ttl_secs,
    };
    Ok((basket, issued))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_store::SharedCache;

    fn open_baskets(cache: &SharedCache) -> Store<Basket> {
        Store::open(cache).unwrap()
    }

    #[test]
    fn test_resolve_without_token() {
        let cache = SharedCache::new();
        let store = open_baskets(&cache);
        assert!(resolve(&store, None).is_none());
    }

    #[test]
    fn test_resolve_stale_token() {
        let cache = SharedCache::new();
        let store = open_baskets(&cache);
        let token = SessionToken::new("bsk_gone");
        assert!(resolve(&store, Some(&token)).is_none());
    }

    #[test]
    fn test_create_issues_token_bound_to_basket() {
        let cache = SharedCache::new();
        let mut store = open_baskets(&cache);

        let (basket, issued) =
            resolve_or_create(&mut store, None, &SessionConfig::default()).unwrap();
        let issued = issued.expect("new session must issue a token");

        assert_eq!(issued.token.as_str(), basket.id.as_str());
        assert_eq!(issued.max_age_secs, TOKEN_TTL_SECS);

        // Minting commits: a fresh store resolves the token.
        let store = open_baskets(&cache);
        let resolved = resolve(&store, Some(&issued.token)).unwrap();
        assert_eq!(resolved.id, basket.id);
    }

    #[test]
    fn test_reuse_existing_keeps_basket() {
        let cache = SharedCache::new();
        let mut store = open_baskets(&cache);
        let config = SessionConfig::default();

        let (first, issued) = resolve_or_create(&mut store, None, &config).unwrap();
        let token = issued.unwrap().token;

        let (second, reissued) = resolve_or_create(&mut store, Some(&token), &config).unwrap();
        assert_eq!(second.id, first.id);
        assert!(reissued.is_none());
    }

    #[test]
    fn test_always_replace_mints_fresh_basket() {
        let cache = SharedCache::new();
        let mut store = open_baskets(&cache);
        let config = SessionConfig {
            create_policy: CreatePolicy::AlwaysReplace,
            ..SessionConfig::default()
        };

        let (first, issued) = resolve_or_create(&mut store, None, &config).unwrap();
        let token = issued.unwrap().token;

        let (second, reissued) = resolve_or_create(&mut store, Some(&token), &config).unwrap();
        assert_ne!(second.id, first.id);
        assert!(reissued.is_some());

        // The old basket is orphaned, not deleted.
        assert!(store.find(first.id.as_str()).is_ok());
    }

    #[test]
    fn test_stale_token_with_creation_mints() {
        let cache = SharedCache::new();
        let mut store = open_baskets(&cache);
        let token = SessionToken::new("bsk_gone");

        let (basket, issued) =
            resolve_or_create(&mut store, Some(&token), &SessionConfig::default()).unwrap();

        assert!(issued.is_some());
        assert_ne!(basket.id.as_str(), token.as_str());
    }
}
