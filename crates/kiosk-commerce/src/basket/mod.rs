//! Shopping basket module.
//!
//! Contains the basket and item types, session binding, the basket service,
//! and the read-side view rows it produces.

mod basket;
mod service;
mod session;
mod views;

pub use basket::{Basket, BasketItem};
pub use service::BasketService;
pub use session::{
    resolve, resolve_or_create, CreatePolicy, IssuedToken, SessionConfig, SessionToken,
    BASKET_COOKIE, TOKEN_TTL_SECS,
};
pub use views::{BasketItemView, BasketSummary};
