use crate::model::{BookId, Review, ReviewCreate, ReviewFilter, ReviewId, ReviewUpdate};
use crate::reviews::ReviewError;
use crate::session::Session;
use crate::store::{CollectionClient, StoreClient, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};

/// Client for the reviews collection.
///
/// Ownership is enforced here, not in the caller's UI: edits and deletes
/// read the review first and compare its author against the session.
#[derive(Clone)]
pub struct ReviewClient {
    inner: CollectionClient<Review>,
}

impl ReviewClient {
    pub fn new(inner: CollectionClient<Review>) -> Self {
        Self { inner }
    }

    /// Posts a review. The comment is stored trimmed and must have visible
    /// content.
    #[instrument(skip(self, comment), fields(user_id = %session.user_id, book_id = %book_id))]
    pub async fn add_review(
        &self,
        session: &Session,
        book_id: BookId,
        comment: &str,
    ) -> Result<ReviewId, ReviewError> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(ReviewError::EmptyComment);
        }
        debug!("Sending request");
        let params = ReviewCreate {
            book_id,
            user_id: session.user_id.clone(),
            comment: comment.to_string(),
            review_date: Utc::now(),
        };
        self.inner
            .create(params)
            .await
            .map_err(ReviewError::from_store)
    }

    /// Every review posted for `book_id`, in store order.
    #[instrument(skip(self))]
    pub async fn reviews_for_book(&self, book_id: BookId) -> Result<Vec<Review>, ReviewError> {
        debug!("Sending request");
        self.inner
            .query(ReviewFilter::for_book(book_id))
            .await
            .map_err(ReviewError::from_store)
    }

    /// Rewrites the comment of the caller's own review.
    ///
    /// The write is guarded by the revision read alongside the ownership
    /// check, so it cannot clobber a concurrent edit it never saw.
    #[instrument(skip(self, comment), fields(user_id = %session.user_id))]
    pub async fn edit_review(
        &self,
        session: &Session,
        id: ReviewId,
        comment: &str,
    ) -> Result<Review, ReviewError> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(ReviewError::EmptyComment);
        }
        let versioned = StoreClient::get(self, id.clone())
            .await?
            .ok_or_else(|| ReviewError::NotFound(id.0.clone()))?;
        if versioned.doc.user_id != session.user_id {
            return Err(ReviewError::NotOwner(id.0.clone()));
        }
        debug!("Sending request");
        let update = ReviewUpdate {
            comment: Some(comment.to_string()),
        };
        self.inner
            .update_if(id, versioned.version, update)
            .await
            .map_err(ReviewError::from_store)
    }

    /// Deletes the caller's own review.
    #[instrument(skip(self), fields(user_id = %session.user_id))]
    pub async fn delete_review(&self, session: &Session, id: ReviewId) -> Result<(), ReviewError> {
        let versioned = StoreClient::get(self, id.clone())
            .await?
            .ok_or_else(|| ReviewError::NotFound(id.0.clone()))?;
        if versioned.doc.user_id != session.user_id {
            return Err(ReviewError::NotOwner(id.0.clone()));
        }
        debug!("Sending request");
        self.inner.delete(id).await.map_err(ReviewError::from_store)
    }
}

#[async_trait]
impl StoreClient<Review> for ReviewClient {
    type Error = ReviewError;

    fn collection(&self) -> &CollectionClient<Review> {
        &self.inner
    }

    fn map_store_error(e: StoreError) -> Self::Error {
        ReviewError::from_store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserId;
    use crate::store::mock::{create_mock_collection, expect_create, MockCollection};
    use crate::store::Versioned;

    fn review(id: &str, user: &str, comment: &str) -> Review {
        Review {
            id: ReviewId::from(id),
            book_id: BookId::from("book_1"),
            user_id: UserId::from(user),
            comment: comment.to_string(),
            review_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn blank_comments_never_reach_the_store() {
        let mut mock = MockCollection::<Review>::new();
        let client = ReviewClient::new(mock.client());
        let session = Session::new("user_1");

        let result = client
            .add_review(&session, BookId::from("book_1"), "   \n  ")
            .await;

        assert_eq!(result, Err(ReviewError::EmptyComment));
        mock.verify();
    }

    #[tokio::test]
    async fn comments_are_stored_trimmed() {
        let (inner, mut receiver) = create_mock_collection::<Review>(10);
        let client = ReviewClient::new(inner);
        let session = Session::new("user_1");

        let task = tokio::spawn(async move {
            client
                .add_review(&session, BookId::from("book_1"), "  Great read  ")
                .await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create");
        assert_eq!(params.comment, "Great read");
        assert_eq!(params.user_id, UserId::from("user_1"));
        responder.send(Ok(ReviewId::from("review_1"))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(ReviewId::from("review_1")));
    }

    #[tokio::test]
    async fn editing_another_users_review_is_refused() {
        let mut mock = MockCollection::<Review>::new();
        mock.expect_get(ReviewId::from("review_1")).return_ok(Some(Versioned {
            version: 1,
            doc: review("review_1", "user_2", "Theirs"),
        }));

        let client = ReviewClient::new(mock.client());
        let session = Session::new("user_1");
        let result = client
            .edit_review(&session, ReviewId::from("review_1"), "Mine now")
            .await;

        assert_eq!(result, Err(ReviewError::NotOwner("review_1".to_string())));
        // The refused edit sent no update
        mock.verify();
    }

    #[tokio::test]
    async fn authors_can_delete_their_own_reviews() {
        let mut mock = MockCollection::<Review>::new();
        mock.expect_get(ReviewId::from("review_1")).return_ok(Some(Versioned {
            version: 1,
            doc: review("review_1", "user_1", "Mine"),
        }));
        mock.expect_delete(ReviewId::from("review_1")).return_ok();

        let client = ReviewClient::new(mock.client());
        let session = Session::new("user_1");

        assert_eq!(
            client.delete_review(&session, ReviewId::from("review_1")).await,
            Ok(())
        );
        mock.verify();
    }
}
