//! # Store Errors
//!
//! This module defines the common error types used throughout the document store.
//! By centralizing error definitions, we ensure consistent error handling across
//! all collections and clients.

/// Errors that can occur within the document store itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    /// The backend could not be reached. Injected by mocks and remote backends;
    /// the in-process store never produces it on its own.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Collection closed")]
    Closed,
    #[error("Collection dropped response channel")]
    Dropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Document already exists: {0}")]
    AlreadyExists(String),
    /// A conditional write observed a different revision than the caller read.
    #[error("Version conflict on {id}: expected {expected}, found {found}")]
    Conflict {
        id: String,
        expected: u64,
        found: u64,
    },
    /// A document hook refused the write.
    #[error("Write rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Whether a retry of the same operation could plausibly succeed.
    ///
    /// Transient errors are I/O-shaped: the backend was unreachable or the
    /// channel tore down mid-flight. Reads can be retried as-is; failed
    /// checkout writes must be retried as a fresh attempt because the
    /// interrupted one may or may not have landed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Unavailable(_) | StoreError::Closed | StoreError::Dropped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification_covers_io_errors_only() {
        assert!(StoreError::Unavailable("timeout".into()).is_transient());
        assert!(StoreError::Closed.is_transient());
        assert!(StoreError::Dropped.is_transient());

        assert!(!StoreError::NotFound("cart_1".into()).is_transient());
        assert!(!StoreError::AlreadyExists("cart_1".into()).is_transient());
        assert!(!StoreError::Rejected("bad lines".into()).is_transient());
        assert!(!StoreError::Conflict {
            id: "cart_1".into(),
            expected: 1,
            found: 2
        }
        .is_transient());
    }
}
