//! # Store Messages
//!
//! This module defines the generic message types used for communication between
//! the `CollectionClient` and `CollectionStore`.

use crate::store::document::Document;
use crate::store::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by collection actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// A document together with the revision the store held when it was read.
///
/// Revisions start at 1 and increase by one on every successful update. Pass
/// the revision back through a conditional write to detect a lost update.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub version: u64,
    pub doc: T,
}

/// Internal message type sent to a collection actor to request operations.
///
/// # The Document Store Contract
/// Each variant maps to one operation of the narrow store interface: point
/// reads, field-equality queries, creation (store-keyed or caller-keyed),
/// partial updates (optionally revision-guarded), and deletion. Every variant
/// acts on a single document; there are no multi-document transactions.
///
/// The enum is generic over `T: Document` and uses the trait's associated
/// types (`Create`, `Update`, `Filter`) so a payload for one collection can
/// never be sent to another.
#[derive(Debug)]
pub enum StoreRequest<T: Document> {
    /// Create a document under a store-generated key.
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    /// Create a document under the caller's key. Fails with `AlreadyExists`
    /// when the key is occupied, so racing lazy creation is detected instead
    /// of silently overwritten.
    Insert {
        id: T::Id,
        params: T::Create,
        respond_to: Response<()>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<Versioned<T>>>,
    },
    /// Scan the collection for documents matching a field-equality filter.
    /// Result order is unspecified; callers sort.
    Query {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    /// Merge the named fields into an existing document. When
    /// `expected_version` is set, the write only applies if the stored
    /// revision still matches; otherwise it fails with `Conflict`.
    Update {
        id: T::Id,
        update: T::Update,
        expected_version: Option<u64>,
        respond_to: Response<T>,
    },
    Delete { id: T::Id, respond_to: Response<()> },
}
