use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Books.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(pub String);

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog book.
///
/// Read-only to the cart and order subsystems: carts snapshot the fields they
/// need at add time, orders snapshot them again at checkout time, so later
/// catalog edits never reach back into existing carts or orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub cover_image_url: String,
    pub description: String,
    /// Price in the smallest currency unit.
    pub price: u64,
}

/// Payload for adding a book to the catalog.
#[derive(Debug, Clone)]
pub struct BookCreate {
    pub title: String,
    pub author: String,
    pub category: String,
    pub cover_image_url: String,
    pub description: String,
    pub price: u64,
}

/// Payload for correcting an existing catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookUpdate {
    pub price: Option<u64>,
    pub description: Option<String>,
}
