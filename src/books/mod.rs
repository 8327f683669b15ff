//! Catalog collection wiring and document implementation.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CatalogClient;
use crate::model::{Book, BookId};
use crate::store::CollectionStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const CHANNEL_CAPACITY: usize = 32;

/// Creates the books collection and its catalog client.
pub fn new() -> (CollectionStore<Book>, CatalogClient) {
    let book_id_counter = Arc::new(AtomicU64::new(1));
    let next_book_id = move || {
        let id = book_id_counter.fetch_add(1, Ordering::SeqCst);
        BookId(format!("book_{}", id))
    };

    let (store, generic_client) =
        CollectionStore::new("books", CHANNEL_CAPACITY, next_book_id);
    let client = CatalogClient::new(generic_client);

    (store, client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookCreate;

    fn book_create(title: &str, price: u64) -> BookCreate {
        BookCreate {
            title: title.to_string(),
            author: "Author".to_string(),
            category: "Fiction".to_string(),
            cover_image_url: "https://covers.example/1.jpg".to_string(),
            description: "A book".to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn factory_assigns_sequential_book_ids() {
        let (store, catalog) = new();
        tokio::spawn(store.run());

        let first = catalog.add_book(book_create("First", 10000)).await.unwrap();
        let second = catalog.add_book(book_create("Second", 5000)).await.unwrap();

        assert_eq!(first, BookId::from("book_1"));
        assert_eq!(second, BookId::from("book_2"));
    }
}
