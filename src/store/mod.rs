//! # Document Store
//!
//! An in-process, schemaless-feeling document store built on the **Actor Model**.
//! Each collection ("books", "carts", "orders", ...) is owned by exactly one
//! [`CollectionStore`] task; all reads and writes travel to it as messages through
//! a cloneable [`CollectionClient`]. Because a collection processes its mailbox
//! sequentially, every single-document operation is atomic without any locking.
//!
//! ## Architecture Overview
//!
//! The store separates concerns into three layers:
//!
//! 1. **Document Layer** ([`Document`]) - Your domain models and their write-validation hooks
//! 2. **Runtime Layer** ([`CollectionStore`]) - Message processing, revision tracking, concurrency
//! 3. **Interface Layer** ([`CollectionClient`]) - Type-safe communication
//!
//! You describe the shape of a document **once** via the trait, and the store
//! handles all the async message passing, error mapping and revision bookkeeping.
//!
//! ## Concurrency Model
//!
//! - Each collection runs in its own Tokio task
//! - Requests are processed **sequentially** within a collection (no locks needed!)
//! - Multiple collections run in **parallel** (true concurrency)
//! - Cross-request races are handled by revisions: every document carries a
//!   monotonically increasing version, and `update_if` refuses to apply a write
//!   built against a stale revision (see [`StoreError::Conflict`])
//!
//! ## Example
//!
//! ```rust
//! use bookshop::store::{CollectionStore, Document};
//!
//! #[derive(Clone, Debug)]
//! struct Counter {
//!     id: String,
//!     value: i64,
//! }
//!
//! #[derive(Debug)] struct CounterCreate { start: i64 }
//! #[derive(Debug)] struct CounterUpdate { add: i64 }
//! #[derive(Debug)] struct CounterFilter;
//!
//! impl Document for Counter {
//!     type Id = String;
//!     type Create = CounterCreate;
//!     type Update = CounterUpdate;
//!     type Filter = CounterFilter;
//!
//!     fn from_create_params(id: String, params: CounterCreate) -> Result<Self, String> {
//!         Ok(Self { id, value: params.start })
//!     }
//!
//!     fn apply_update(&mut self, update: CounterUpdate) -> Result<(), String> {
//!         self.value += update.add;
//!         Ok(())
//!     }
//!
//!     fn matches(&self, _filter: &CounterFilter) -> bool {
//!         true
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (store, client) =
//!         CollectionStore::<Counter>::new("counters", 10, || "counter_1".to_string());
//!     tokio::spawn(store.run());
//!
//!     let id = client.create(CounterCreate { start: 41 }).await.unwrap();
//!     let updated = client.update(id.clone(), CounterUpdate { add: 1 }).await.unwrap();
//!     assert_eq!(updated.value, 42);
//! }
//! ```
//!
//! ## Testing
//!
//! The store provides a **MockCollection** type that hands out the same
//! [`CollectionClient`] API as a real collection but operates entirely in-memory.
//! It lets you write fast, deterministic unit tests for repository logic without
//! spawning any stores. See the [`mock`] module for the full API and usage patterns.

pub mod client;
pub mod client_trait;
pub mod collection;
pub mod document;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use client::CollectionClient;
pub use client_trait::StoreClient;
pub use collection::CollectionStore;
pub use document::Document;
pub use error::StoreError;
pub use message::{Response, StoreRequest, Versioned};
