//! Cart collection wiring and document implementation.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CartRepository;
use crate::model::Cart;
use crate::session::UserId;
use crate::store::CollectionStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const CHANNEL_CAPACITY: usize = 32;

/// Creates the carts collection and its repository.
///
/// Carts are keyed by user id and written through `insert`, so the anonymous
/// id generator below only ever runs if something calls `create` on this
/// collection directly.
pub fn new() -> (CollectionStore<Cart>, CartRepository) {
    let cart_id_counter = Arc::new(AtomicU64::new(1));
    let next_cart_id = move || {
        let id = cart_id_counter.fetch_add(1, Ordering::SeqCst);
        UserId(format!("cart_{}", id))
    };

    let (store, generic_client) =
        CollectionStore::new("carts", CHANNEL_CAPACITY, next_cart_id);
    let repository = CartRepository::new(generic_client);

    (store, repository)
}
