//! # StoreClient Trait
//!
//! Provides a common interface for collection-specific wrappers, adding a default
//! revision-aware `get` built on top of a generic [`CollectionClient`].
//!
//! Unlike the raw client, the trait deliberately provides no default `delete`:
//! most wrappers gate destructive writes behind domain rules (delivered-only
//! order deletion, author-only review removal), and an inherited ungated delete
//! would bypass them. Wrappers define their own removal methods.

use crate::store::{CollectionClient, Document, StoreError, Versioned};
use async_trait::async_trait;

/// Trait for collection-specific wrappers to inherit shared read plumbing.
///
/// # Example
///
/// ```rust
/// use bookshop::store::{CollectionClient, Document, StoreClient, StoreError};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: String, label: String }
/// #[derive(Debug)] struct TagCreate { label: String }
/// #[derive(Debug)] struct TagUpdate;
/// #[derive(Debug)] struct TagFilter;
/// #[derive(Debug, thiserror::Error)]
/// #[error("Tag store error: {0}")]
/// struct TagError(StoreError);
///
/// impl Document for Tag {
///     type Id = String;
///     type Create = TagCreate;
///     type Update = TagUpdate;
///     type Filter = TagFilter;
///
///     fn from_create_params(id: String, params: TagCreate) -> Result<Self, String> {
///         Ok(Self { id, label: params.label })
///     }
///     fn apply_update(&mut self, _: TagUpdate) -> Result<(), String> { Ok(()) }
///     fn matches(&self, _: &TagFilter) -> bool { true }
/// }
///
/// struct TagClient { inner: CollectionClient<Tag> }
///
/// #[async_trait]
/// impl StoreClient<Tag> for TagClient {
///     type Error = TagError;
///
///     fn collection(&self) -> &CollectionClient<Tag> {
///         &self.inner
///     }
///
///     fn map_store_error(e: StoreError) -> Self::Error {
///         TagError(e)
///     }
/// }
///
/// async fn usage(client: TagClient) {
///     // get() is provided automatically.
///     let _ = client.get("tag_1".to_string()).await;
/// }
/// ```
#[async_trait]
pub trait StoreClient<T: Document>: Send + Sync {
    /// The collection-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic CollectionClient.
    fn collection(&self) -> &CollectionClient<T>;

    /// Map store errors to the specific collection error type.
    fn map_store_error(e: StoreError) -> Self::Error;

    /// Fetch a document and its revision by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, Self::Error> {
        tracing::debug!("Sending request");
        self.collection()
            .get(id)
            .await
            .map_err(Self::map_store_error)
    }
}
