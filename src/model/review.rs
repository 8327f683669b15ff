use crate::model::BookId;
use crate::session::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Reviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub String);

impl From<&str> for ReviewId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ReviewId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reader comment on a book. Mutable only by its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub book_id: BookId,
    pub user_id: UserId,
    pub comment: String,
    pub review_date: DateTime<Utc>,
}

/// Payload for posting a review.
#[derive(Debug, Clone)]
pub struct ReviewCreate {
    pub book_id: BookId,
    pub user_id: UserId,
    pub comment: String,
    pub review_date: DateTime<Utc>,
}

/// Payload for editing a review. Only the comment is editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub comment: Option<String>,
}

/// Field-equality filter over reviews.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub book_id: Option<BookId>,
}

impl ReviewFilter {
    /// Every review posted for one book.
    pub fn for_book(book_id: BookId) -> Self {
        Self {
            book_id: Some(book_id),
        }
    }
}
