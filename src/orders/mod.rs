//! Order collection wiring, document implementation, and history projections.

pub mod entity;
pub mod error;
pub mod projection;

pub use error::*;
pub use projection::*;

use crate::model::{Order, OrderId};
use crate::store::{CollectionClient, CollectionStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const CHANNEL_CAPACITY: usize = 32;

/// Creates the orders collection and its generic client.
///
/// Orders have two consumers with different verbs (the checkout builder
/// writes, the history reads and deletes), so the factory hands back the raw
/// client and each consumer wraps its own clone.
pub fn new() -> (CollectionStore<Order>, CollectionClient<Order>) {
    let order_id_counter = Arc::new(AtomicU64::new(1));
    let next_order_id = move || {
        let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
        OrderId(format!("order_{}", id))
    };

    let (store, client) = CollectionStore::new("orders", CHANNEL_CAPACITY, next_order_id);

    (store, client)
}
