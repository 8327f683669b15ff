//! # Generic Collection Client
//!
//! This module defines the generic client for talking to a collection actor.

use crate::store::document::Document;
use crate::store::error::StoreError;
use crate::store::message::{StoreRequest, Versioned};
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle to one [`CollectionStore`](crate::store::CollectionStore).
///
/// Forwards requests over a Tokio mpsc channel and receives results via oneshot
/// channels. The client holds only a sender, so cloning is inexpensive and the
/// handle can be shared across tasks.
#[derive(Clone)]
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    /// Create a document under a store-generated key.
    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { params, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// Create a document under the caller's key. Fails with
    /// [`StoreError::AlreadyExists`] when the key is occupied.
    pub async fn insert(&self, id: T::Id, params: T::Create) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Insert {
                id,
                params,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// Point read. Absence is `Ok(None)`, not an error.
    pub async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// Field-equality scan. Result order is unspecified; callers sort.
    pub async fn query(&self, filter: T::Filter) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Query { filter, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// Merge the named fields into an existing document, regardless of its
    /// current revision.
    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Update {
                id,
                update,
                expected_version: None,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// Merge the named fields only if the stored revision still equals
    /// `expected_version`; otherwise fails with [`StoreError::Conflict`].
    pub async fn update_if(
        &self,
        id: T::Id,
        expected_version: u64,
        update: T::Update,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Update {
                id,
                update,
                expected_version: Some(expected_version),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete { id, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }
}
