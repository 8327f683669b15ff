//! Document trait implementation for the catalog Book type.

use crate::model::{Book, BookCreate, BookId, BookUpdate};
use crate::store::Document;

impl Document for Book {
    type Id = BookId;
    type Create = BookCreate;
    type Update = BookUpdate;
    // Catalog browsing is out of scope; books are point-read by id.
    type Filter = ();

    fn from_create_params(id: BookId, params: BookCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            title: params.title,
            author: params.author,
            category: params.category,
            cover_image_url: params.cover_image_url,
            description: params.description,
            price: params.price,
        })
    }

    fn apply_update(&mut self, update: BookUpdate) -> Result<(), String> {
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        Ok(())
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }
}
