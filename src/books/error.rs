//! Error types for the catalog.

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested book is not in the catalog.
    #[error("Book not found: {0}")]
    NotFound(String),

    /// An underlying store error occurred.
    #[error("Catalog store error: {0}")]
    Store(StoreError),
}

impl CatalogError {
    /// Maps raw store failures onto catalog terms.
    pub(crate) fn from_store(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => CatalogError::NotFound(id),
            other => CatalogError::Store(other),
        }
    }
}
