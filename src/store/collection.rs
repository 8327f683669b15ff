//! # Generic Collection Actor
//!
//! This module defines the `CollectionStore`, the core component that holds the
//! documents of one collection. It implements the "Server" side of the Actor Model,
//! processing messages sequentially and ensuring exclusive access to the documents.

use crate::store::client::CollectionClient;
use crate::store::document::Document;
use crate::store::error::StoreError;
use crate::store::message::{StoreRequest, Versioned};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns all documents of one collection.
///
/// # Architecture Note
/// This struct is the "Server" half of the store. It owns the state (`docs`) and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each collection processes its messages *sequentially* in a loop, so no `Mutex`
/// or `RwLock` is needed for `docs`. Sequential draining is also what makes every
/// individual operation atomic with respect to its collection: a read-modify-write
/// *across* two messages is still racy, which is why documents carry revisions and
/// the `Update` message accepts an expected revision (see
/// [`StoreRequest::Update`](crate::store::StoreRequest)).
///
/// # Usage Pattern
///
/// 1. **Create**: Call `CollectionStore::new()` to get the store (server) and its
///    [`CollectionClient`] (interface).
/// 2. **Run**: Spawn the store's run loop in a background task.
/// 3. **Use**: Clone the client freely and send requests from any task.
///
/// # Revisions
///
/// Every stored document carries a monotonically increasing revision: 1 when
/// created or inserted, bumped by one on each successful update. Reads return
/// the revision alongside the document so callers can issue conditional writes.
pub struct CollectionStore<T: Document> {
    name: &'static str,
    receiver: mpsc::Receiver<StoreRequest<T>>,
    docs: HashMap<T::Id, Versioned<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Document> CollectionStore<T> {
    /// Creates a new `CollectionStore` and its associated `CollectionClient`.
    ///
    /// # Arguments
    ///
    /// * `name` - The collection name used in structured log output.
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls on the client will wait until there is space.
    /// * `next_id_fn` - Key generator for `Create` requests. Collections that are
    ///   only ever caller-keyed still pass one; it simply goes unused.
    pub fn new(
        name: &'static str,
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            name,
            receiver,
            docs: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = CollectionClient::new(sender);
        (store, client)
    }

    /// Runs the collection's event loop, processing messages until the channel
    /// closes.
    pub async fn run(mut self) {
        let collection = self.name;
        info!(collection, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(collection, ?params, "Create");
                    let id = (self.next_id_fn)();

                    match T::from_create_params(id.clone(), params) {
                        Ok(doc) => {
                            self.docs.insert(id.clone(), Versioned { version: 1, doc });
                            info!(collection, %id, size = self.docs.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(collection, error = %e, "Create rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(e)));
                        }
                    }
                }
                StoreRequest::Insert {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(collection, %id, ?params, "Insert");
                    if self.docs.contains_key(&id) {
                        warn!(collection, %id, "Already exists");
                        let _ = respond_to.send(Err(StoreError::AlreadyExists(id.to_string())));
                        continue;
                    }
                    match T::from_create_params(id.clone(), params) {
                        Ok(doc) => {
                            self.docs.insert(id.clone(), Versioned { version: 1, doc });
                            info!(collection, %id, size = self.docs.len(), "Inserted");
                            let _ = respond_to.send(Ok(()));
                        }
                        Err(e) => {
                            warn!(collection, %id, error = %e, "Insert rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(e)));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.docs.get(&id).cloned();
                    let found = item.is_some();
                    debug!(collection, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Query { filter, respond_to } => {
                    let matched: Vec<T> = self
                        .docs
                        .values()
                        .filter(|v| v.doc.matches(&filter))
                        .map(|v| v.doc.clone())
                        .collect();
                    debug!(collection, ?filter, matched = matched.len(), "Query");
                    let _ = respond_to.send(Ok(matched));
                }
                StoreRequest::Update {
                    id,
                    update,
                    expected_version,
                    respond_to,
                } => {
                    debug!(collection, %id, ?update, expected_version, "Update");
                    if let Some(stored) = self.docs.get_mut(&id) {
                        if let Some(expected) = expected_version {
                            if stored.version != expected {
                                warn!(
                                    collection, %id,
                                    expected, found = stored.version,
                                    "Version conflict"
                                );
                                let _ = respond_to.send(Err(StoreError::Conflict {
                                    id: id.to_string(),
                                    expected,
                                    found: stored.version,
                                }));
                                continue;
                            }
                        }
                        if let Err(e) = stored.doc.apply_update(update) {
                            warn!(collection, %id, error = %e, "Update rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(e)));
                            continue;
                        }
                        stored.version += 1;
                        info!(collection, %id, version = stored.version, "Updated");
                        let _ = respond_to.send(Ok(stored.doc.clone()));
                    } else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(collection, %id, "Delete");
                    if self.docs.remove(&id).is_some() {
                        info!(collection, %id, size = self.docs.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(collection, size = self.docs.len(), "Shutdown");
    }
}
