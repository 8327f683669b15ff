//! Document trait implementation for the Review type.

use crate::model::{Review, ReviewCreate, ReviewFilter, ReviewId, ReviewUpdate};
use crate::store::Document;

impl Document for Review {
    type Id = ReviewId;
    type Create = ReviewCreate;
    type Update = ReviewUpdate;
    type Filter = ReviewFilter;

    fn from_create_params(id: ReviewId, params: ReviewCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            book_id: params.book_id,
            user_id: params.user_id,
            comment: params.comment,
            review_date: params.review_date,
        })
    }

    fn apply_update(&mut self, update: ReviewUpdate) -> Result<(), String> {
        if let Some(comment) = update.comment {
            self.comment = comment;
        }
        Ok(())
    }

    fn matches(&self, filter: &ReviewFilter) -> bool {
        filter.book_id.as_ref().is_none_or(|b| &self.book_id == b)
    }
}
