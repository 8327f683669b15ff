//! Error types for the review repository.

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during review operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    /// The requested review was not found.
    #[error("Review not found: {0}")]
    NotFound(String),

    /// Only the author may edit or delete a review.
    #[error("Review {0} belongs to another user")]
    NotOwner(String),

    /// Review comments must have visible content.
    #[error("Review comment must not be blank")]
    EmptyComment,

    /// An underlying store error occurred.
    #[error("Review store error: {0}")]
    Store(StoreError),
}

impl ReviewError {
    /// Maps raw store failures onto review terms.
    pub(crate) fn from_store(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => ReviewError::NotFound(id),
            other => ReviewError::Store(other),
        }
    }
}
