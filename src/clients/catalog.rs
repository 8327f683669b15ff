use crate::books::CatalogError;
use crate::model::{Book, BookCreate, BookId, BookUpdate};
use crate::store::{CollectionClient, StoreClient, StoreError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the books collection.
///
/// The catalog is ingest-and-read from this subsystem's point of view: books
/// get added and corrected through here, while carts and orders only ever
/// read them.
#[derive(Clone)]
pub struct CatalogClient {
    inner: CollectionClient<Book>,
}

impl CatalogClient {
    pub fn new(inner: CollectionClient<Book>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params))]
    pub async fn add_book(&self, params: BookCreate) -> Result<BookId, CatalogError> {
        debug!(title = %params.title, "Sending request");
        self.inner
            .create(params)
            .await
            .map_err(CatalogError::from_store)
    }

    /// Point read for detail views and direct purchases.
    #[instrument(skip(self))]
    pub async fn book(&self, id: BookId) -> Result<Book, CatalogError> {
        let versioned = StoreClient::get(self, id.clone()).await?;
        versioned
            .map(|v| v.doc)
            .ok_or_else(|| CatalogError::NotFound(id.0))
    }

    /// Corrects an existing catalog entry. Carts keep the price they
    /// captured; only future adds see the new one.
    #[instrument(skip(self, update))]
    pub async fn update_book(&self, id: BookId, update: BookUpdate) -> Result<Book, CatalogError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(CatalogError::from_store)
    }
}

#[async_trait]
impl StoreClient<Book> for CatalogClient {
    type Error = CatalogError;

    fn collection(&self) -> &CollectionClient<Book> {
        &self.inner
    }

    fn map_store_error(e: StoreError) -> Self::Error {
        CatalogError::from_store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MockCollection;

    #[tokio::test]
    async fn missing_books_surface_as_not_found() {
        let mut mock = MockCollection::<Book>::new();
        mock.expect_get(BookId::from("book_9")).return_ok(None);

        let catalog = CatalogClient::new(mock.client());
        let result = catalog.book(BookId::from("book_9")).await;

        assert_eq!(result, Err(CatalogError::NotFound("book_9".to_string())));
        mock.verify();
    }
}
