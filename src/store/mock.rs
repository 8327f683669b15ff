//! # Mock Collections & Testing Guide
//!
//! The `MockCollection<T>` type hands out the same `CollectionClient<T>` API as a
//! real collection but operates entirely in-memory against an expectation queue. It
//! lets tests script store responses, including failures that are hard to reproduce
//! with a real collection (timeouts, partial outages), and then verify that exactly
//! the expected traffic occurred.
//!
//! ## When to use Mocks vs Real Collections
//!
//! | Feature | MockCollection | Real Collection |
//! |---------|----------------|-----------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real document state |
//! | **Use Case** | Unit testing logic *around* the client | Testing the store or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Failure Scenarios
//!
//! The main reason this module exists: proving how repositories behave when the
//! store fails mid-flow. A queue of `return_ok` / `return_err` expectations scripts
//! exactly where the outage happens, and `verify()` proves the code under test
//! stopped issuing requests afterwards.
//!
//! ```rust
//! use bookshop::store::mock::MockCollection;
//! use bookshop::store::{Document, StoreError};
//!
//! #[derive(Clone, Debug)] struct Tag { id: String }
//! #[derive(Debug)] struct TagCreate;
//! #[derive(Debug)] struct TagUpdate;
//! #[derive(Debug)] struct TagFilter;
//!
//! impl Document for Tag {
//!     type Id = String;
//!     type Create = TagCreate;
//!     type Update = TagUpdate;
//!     type Filter = TagFilter;
//!     fn from_create_params(id: String, _: TagCreate) -> Result<Self, String> { Ok(Self { id }) }
//!     fn apply_update(&mut self, _: TagUpdate) -> Result<(), String> { Ok(()) }
//!     fn matches(&self, _: &TagFilter) -> bool { true }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockCollection::<Tag>::new();
//!     let client = mock.client();
//!
//!     // Simulate a downstream failure
//!     mock.expect_get("tag_1".to_string())
//!         .return_err(StoreError::Unavailable("timeout".into()));
//!
//!     // Verify your code handles it gracefully
//!     let result = client.get("tag_1".to_string()).await;
//!     assert!(matches!(result, Err(StoreError::Unavailable(_))));
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_collection`] to get a client and a raw request receiver when a
//! test needs to assert on request *payloads* (what exactly was sent), or use the
//! fluent [`MockCollection`] API when scripting *responses* is enough.

use crate::store::client::CollectionClient;
use crate::store::document::Document;
use crate::store::error::StoreError;
use crate::store::message::{StoreRequest, Versioned};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock collection.
enum Expectation<T: Document> {
    Get {
        id: T::Id,
        response: Result<Option<Versioned<T>>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    Insert {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Query {
        response: Result<Vec<T>, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
}

/// A mock collection with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockCollection::<Order>::new();
/// mock.expect_create().return_ok(OrderId::from("order_1"));
/// mock.expect_create().return_err(StoreError::Unavailable("disk".into()));
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were consumed
/// ```
pub struct MockCollection<T: Document> {
    client: CollectionClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> Default for MockCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> MockCollection<T> {
    /// Creates a new mock collection with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Background task answering requests from the expectation queue
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Get { id: _, respond_to },
                        Some(Expectation::Get { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Create {
                            params: _,
                            respond_to,
                        },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Insert {
                            id: _,
                            params: _,
                            respond_to,
                        },
                        Some(Expectation::Insert { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Query {
                            filter: _,
                            respond_to,
                        },
                        Some(Expectation::Query { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update {
                            id: _,
                            update: _,
                            expected_version: _,
                            respond_to,
                        },
                        Some(Expectation::Update { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { id: _, respond_to },
                        Some(Expectation::Delete { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `insert` operation.
    pub fn expect_insert(&mut self, id: T::Id) -> InsertExpectationBuilder<T> {
        InsertExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `query` operation.
    pub fn expect_query(&mut self) -> QueryExpectationBuilder<T> {
        QueryExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` operation (conditional or not).
    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: Document> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<Versioned<T>>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: Document> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> CreateExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, id: T::Id) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Create { response: Ok(id) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Create {
            response: Err(error),
        });
    }
}

/// Builder for `insert` expectations.
pub struct InsertExpectationBuilder<T: Document> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> InsertExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Insert {
            id: self.id,
            response: Ok(()),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Insert {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `query` expectations.
pub struct QueryExpectationBuilder<T: Document> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> QueryExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, docs: Vec<T>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Query { response: Ok(docs) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Query {
            response: Err(error),
        });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: Document> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> UpdateExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, doc: T) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Update {
            id: self.id,
            response: Ok(doc),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Update {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: Document> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> DeleteExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Delete {
            id: self.id,
            response: Ok(()),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Delete {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// RAW-CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// In unit tests, we don't want to spin up a full `CollectionStore` when we are
/// just testing the logic *around* the client (e.g., `CartRepository`).
///
/// This helper hands back a client wired to a channel the test controls. The
/// test inspects the messages arriving on that channel, asserts their payloads
/// are correct, and answers through the bundled oneshot sender. That makes the
/// store's behavior (success, failure, stale revisions) fully scripted.
///
/// **Note**: Consider using [`MockCollection`] when you only need to script
/// responses and don't care about payload contents.
pub fn create_mock_collection<T: Document>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Create,
    tokio::sync::oneshot::Sender<Result<T::Id, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Id,
    T::Create,
    tokio::sync::oneshot::Sender<Result<(), StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert {
            id,
            params,
            respond_to,
        }) => Some((id, params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Id,
    tokio::sync::oneshot::Sender<Result<Option<Versioned<T>>, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request.
/// Returns the expected revision as well so tests can assert a write was
/// properly guarded.
pub async fn expect_update<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Id,
    T::Update,
    Option<u64>,
    tokio::sync::oneshot::Sender<Result<T, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Update {
            id,
            update,
            expected_version,
            respond_to,
        }) => Some((id, update, expected_version, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: String,
        label: String,
        slots: u32,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        label: String,
        slots: u32,
    }

    #[derive(Debug)]
    struct ShelfUpdate {
        label: Option<String>,
    }

    #[derive(Debug)]
    struct ShelfFilter {
        label: Option<String>,
    }

    impl Document for Shelf {
        type Id = String;
        type Create = ShelfCreate;
        type Update = ShelfUpdate;
        type Filter = ShelfFilter;

        fn from_create_params(id: String, params: ShelfCreate) -> Result<Self, String> {
            Ok(Self {
                id,
                label: params.label,
                slots: params.slots,
            })
        }

        fn apply_update(&mut self, update: ShelfUpdate) -> Result<(), String> {
            if let Some(label) = update.label {
                self.label = label;
            }
            Ok(())
        }

        fn matches(&self, filter: &ShelfFilter) -> bool {
            filter.label.as_ref().is_none_or(|l| &self.label == l)
        }
    }

    impl Shelf {
        fn new(id: &str, label: &str) -> Self {
            Self {
                id: id.to_string(),
                label: label.to_string(),
                slots: 12,
            }
        }
    }

    #[tokio::test]
    async fn test_raw_channel_mock() {
        let (client, mut receiver) = create_mock_collection::<Shelf>(10);

        // Test Create
        let create_task = tokio::spawn(async move {
            client
                .create(ShelfCreate {
                    label: "window".to_string(),
                    slots: 12,
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.label, "window");
        responder.send(Ok("shelf_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(id) if id == "shelf_1"));
    }

    #[tokio::test]
    async fn test_mock_collection_with_expectations() {
        // Create mock with fluent expectation API
        let mut mock = MockCollection::<Shelf>::new();

        // Set up expectations
        mock.expect_create().return_ok("shelf_1".to_string());
        mock.expect_get("shelf_1".to_string()).return_ok(Some(Versioned {
            version: 1,
            doc: Shelf::new("shelf_1", "window"),
        }));

        let client = mock.client();

        // Execute operations
        let id = client
            .create(ShelfCreate {
                label: "window".to_string(),
                slots: 12,
            })
            .await
            .unwrap();
        assert_eq!(id, "shelf_1");

        let fetched = client.get("shelf_1".to_string()).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().doc.label, "window");

        // Verify all expectations were met
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_collection_error_injection() {
        let mut mock = MockCollection::<Shelf>::new();
        mock.expect_query()
            .return_err(StoreError::Unavailable("partition".into()));

        let client = mock.client();
        let result = client.query(ShelfFilter { label: None }).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        mock.verify();
    }
}
