//! Error types for the cart repository.

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// No cart document exists for the user.
    #[error("Cart not found for user: {0}")]
    CartNotFound(String),

    /// The cart has no line for the requested book.
    #[error("Cart line not found for book: {0}")]
    LineNotFound(String),

    /// Another writer kept winning the revision race until the retry budget
    /// ran out.
    #[error("Cart was concurrently modified too many times")]
    ConcurrentlyModified,

    /// An underlying store error occurred.
    #[error("Cart store error: {0}")]
    Store(StoreError),
}

impl CartError {
    /// Maps raw store failures onto cart terms.
    pub(crate) fn from_store(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => CartError::CartNotFound(id),
            other => CartError::Store(other),
        }
    }
}
