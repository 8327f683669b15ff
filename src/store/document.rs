//! # Document Trait
//!
//! The `Document` trait defines the contract that every persisted record (Book, Cart,
//! Order, Review) must implement to be managed by the generic [`CollectionStore`].
//! It specifies associated types for keys, DTOs, and query filters, and provides the
//! hooks the store calls when materializing, merging, and scanning documents.
//!
//! # Architecture Note
//! Why do we need this trait?
//! By defining a contract (`Document`) that all our record types must satisfy, we can
//! write the `CollectionStore` logic *once* and reuse it for every collection.
//!
//! We use "Associated Types" (type Id, type Create, etc.) to enforce type safety.
//! A carts collection requires a `CartCreate` payload, and you can't accidentally send
//! it an `OrderCreate` payload. The compiler prevents this class of bugs entirely.
//!
//! [`CollectionStore`]: crate::store::CollectionStore

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any persisted record must implement to live in a [`CollectionStore`].
///
/// # Hooks
/// The store invokes three hooks:
/// - [`Document::from_create_params`] materializes a document from its key and payload.
/// - [`Document::apply_update`] merges a partial update into the document.
/// - [`Document::matches`] evaluates a field-equality filter during a query scan.
///
/// Hooks that return `Err` reject the write; the store surfaces the message as
/// [`StoreError::Rejected`](crate::store::StoreError::Rejected). An `apply_update`
/// implementation must leave the document unchanged when it returns `Err`.
///
/// [`CollectionStore`]: crate::store::CollectionStore
pub trait Document: Clone + Send + Sync + 'static {
    /// The unique key for this document within its collection. Keys are opaque;
    /// collections either generate them (orders, reviews) or take them from the
    /// caller (carts are keyed by user id).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new document (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to partially update an existing document. Fields left
    /// unset keep their stored values.
    type Update: Send + Sync + Debug;

    /// Field-equality predicate evaluated against every document during a query.
    type Filter: Send + Sync + Debug;

    /// Construct the full document from its key and payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, String>;

    /// Merge a partial update into this document. Must not mutate `self` when
    /// returning `Err`.
    fn apply_update(&mut self, update: Self::Update) -> Result<(), String>;

    /// Whether this document satisfies the filter. Every equality the filter
    /// names must hold for the document to match.
    fn matches(&self, filter: &Self::Filter) -> bool;
}
