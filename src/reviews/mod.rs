//! Review collection wiring and document implementation.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ReviewClient;
use crate::model::{Review, ReviewId};
use crate::store::CollectionStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const CHANNEL_CAPACITY: usize = 32;

/// Creates the reviews collection and its client.
pub fn new() -> (CollectionStore<Review>, ReviewClient) {
    let review_id_counter = Arc::new(AtomicU64::new(1));
    let next_review_id = move || {
        let id = review_id_counter.fetch_add(1, Ordering::SeqCst);
        ReviewId(format!("review_{}", id))
    };

    let (store, generic_client) =
        CollectionStore::new("reviews", CHANNEL_CAPACITY, next_review_id);
    let client = ReviewClient::new(generic_client);

    (store, client)
}
