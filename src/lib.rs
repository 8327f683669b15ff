#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Bookshop
//!
//! > **A cart and order consistency core on an actor-based document store.**
//!
//! This crate implements the storefront backend of a small bookshop: cart
//! persistence, checkout (direct purchase and multi-line cart checkout), an
//! order-history projection, and book reviews. All state lives in an
//! in-process document store built on the **Actor Model**: one Tokio task per
//! collection, message-passing clients, sequential processing.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why an actor per collection?
//!
//! - **Single-document atomicity**: a collection drains its mailbox sequentially, so every read or write of one document is atomic without locks.
//! - **Honest remote semantics**: repositories reach collections only through async clients, the way they would reach a hosted document database. There are no multi-document transactions to lean on, and the domain layer is written accordingly.
//! - **Type safety**: each collection is typed by its document; wrong payloads do not compile.
//!
//! ### Consistency where it matters
//!
//! Cart mutations are read-modify-write over a whole document, which loses
//! updates under concurrency. Every stored document therefore carries a
//! revision, and cart writes go through compare-and-swap (`update_if`) with
//! a bounded retry loop. See [`clients::CartRepository`] for the full story.
//!
//! ### Validation in two places
//!
//! Input hygiene (recipient fields, blank comments, empty checkouts) is
//! checked at the repository edge, before any request is sent. Structural
//! document invariants (one cart line per book, forward-only order statuses)
//! are enforced by the document hooks inside the store, so no write path can
//! bypass them.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`store`])
//! The generic document store. [`CollectionStore`](store::CollectionStore)
//! owns the documents, [`CollectionClient`](store::CollectionClient) talks to
//! it, and [`Document`](store::Document) is the contract a stored type
//! implements.
//!
//! ### 2. The Data ([`model`])
//! Pure DTOs: [`Book`](model::Book), [`Cart`](model::Cart),
//! [`Order`](model::Order), [`Review`](model::Review), their typed ids, and
//! the create/update/filter payloads.
//!
//! ### 3. The Collections ([`books`], [`carts`], [`orders`], [`reviews`])
//! Per-collection wiring: [`Document`](store::Document) implementations with
//! their validation hooks, domain error types, and the factory that spawns
//! each collection.
//!
//! ### 4. The Interface ([`clients`])
//! Domain repositories over the generic clients:
//! [`CartRepository`](clients::CartRepository),
//! [`OrderBuilder`](clients::OrderBuilder),
//! [`OrderHistory`](clients::OrderHistory),
//! [`CatalogClient`](clients::CatalogClient), and
//! [`ReviewClient`](clients::ReviewClient).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`ShopSystem`](lifecycle::ShopSystem) spins up the four collections, wires
//! the repositories, and shuts everything down cleanly.
//!
//! ## 🧪 Testing
//!
//! Repository logic is unit-tested against [`store::mock::MockCollection`],
//! which scripts store responses (including failures) without spawning any
//! collection. End-to-end flows run against a real
//! [`ShopSystem`](lifecycle::ShopSystem) in `tests/`.
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Run with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod books;
pub mod carts;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod orders;
pub mod reviews;
pub mod session;
pub mod store;
