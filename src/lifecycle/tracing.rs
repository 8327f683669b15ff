//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the whole shop system.
//!
//! ## Overview
//!
//! The [`setup_tracing`] function initializes structured logging with the
//! `tracing` crate, providing hierarchical spans that show the complete
//! request flow from a repository method down to the collection actor.
//!
//! ## Configuration
//!
//! Output uses a compact format that hides the crate/module prefix
//! (`with_target(false)`); the structured `collection` field already names
//! the subsystem a line belongs to.
//!
//! - **Structured logging** with the `tracing` crate
//! - **Hierarchical spans** for request tracing
//! - **Configurable log levels** via the `RUST_LOG` environment variable
//! - **Compact format** optimized for development
//!
//! ## What Gets Traced
//!
//! - **Collection lifecycle**: startup, shutdown, and final document counts
//! - **Document operations**: Create, Insert, Get, Query, Update, Delete
//! - **Request flow**: repository spans (`add_line`, `checkout_cart_lines`)
//!   wrapping the engine events they trigger
//! - **Conflicts**: revision mismatches and retry rounds at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads with debug logs
//! RUST_LOG=debug cargo run
//!
//! # Filter to the engine only
//! RUST_LOG=bookshop::store=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`** a checkout of two cart lines looks like:
//!
//! ```text
//! INFO checkout_cart_lines{user_id=user_1 lines=2}: Creating orders checkout_id=4f0f...
//! INFO Created collection="orders" id=order_1 size=1
//! INFO Created collection="orders" id=order_2 size=2
//! ```
//!
//! Run with `RUST_LOG=debug` to additionally see every request a repository
//! sends before the engine answers it.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - the collection field names the subsystem
        .compact() // Compact format shows spans inline (e.g., "checkout_cart_lines")
        .init();
}
