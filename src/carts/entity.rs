//! Document trait implementation for the Cart type.
//!
//! The hooks enforce the cart's structural shape on every write: at most one
//! line per book and no zero quantities ever reach the stored document, no
//! matter which code path produced the line list.

use crate::model::{Cart, CartCreate, CartLine, CartUpdate};
use crate::session::UserId;
use crate::store::Document;
use std::collections::HashSet;

fn validate_lines(lines: &[CartLine]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for line in lines {
        if line.quantity == 0 {
            return Err(format!("Cart line for {} has quantity 0", line.book_id));
        }
        if !seen.insert(&line.book_id) {
            return Err(format!("Cart has more than one line for {}", line.book_id));
        }
    }
    Ok(())
}

impl Document for Cart {
    // The cart key IS the owning user's id: one cart per user.
    type Id = UserId;
    type Create = CartCreate;
    type Update = CartUpdate;
    type Filter = ();

    fn from_create_params(id: UserId, params: CartCreate) -> Result<Self, String> {
        validate_lines(&params.lines)?;
        Ok(Self {
            user_id: id,
            lines: params.lines,
        })
    }

    fn apply_update(&mut self, update: CartUpdate) -> Result<(), String> {
        if let Some(lines) = update.lines {
            validate_lines(&lines)?;
            self.lines = lines;
        }
        Ok(())
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }
}
