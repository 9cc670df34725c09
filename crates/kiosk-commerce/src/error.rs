//! Commerce error types.

use kiosk_store::StoreError;
use thiserror::Error;

/// Errors that can occur in catalog and basket operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Arithmetic overflow or currency mismatch while pricing a basket.
    #[error("arithmetic overflow in price calculation")]
    Overflow,

    /// Failure from the underlying entity store. A `NotFound` here on a
    /// confirmed-present id is a programmer error, not a retryable state.
    #[error(transparent)]
    Store(#[from] StoreError),
}
