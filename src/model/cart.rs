use crate::model::{Book, BookId};
use crate::session::UserId;
use serde::{Deserialize, Serialize};

/// A single book entry inside a cart.
///
/// Everything except `quantity` is a snapshot of the book at the moment it
/// was first added. `price_at_added` in particular never tracks later catalog
/// price changes; the cart total is computed from the captured price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub book_id: BookId,
    pub book_title: String,
    pub author: String,
    pub category: String,
    pub cover_image_url: String,
    pub description: String,
    /// Unit price in the smallest currency unit, captured at add time.
    pub price_at_added: u64,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshots `book` into a line with the given quantity.
    pub fn for_book(book: &Book, quantity: u32) -> Self {
        Self {
            book_id: book.id.clone(),
            book_title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            cover_image_url: book.cover_image_url.clone(),
            description: book.description.clone(),
            price_at_added: book.price,
            quantity,
        }
    }

    /// Line subtotal: captured unit price times quantity.
    pub fn subtotal(&self) -> u64 {
        self.price_at_added * self.quantity as u64
    }
}

/// A user's shopping cart.
///
/// Keyed by the owning user's id, one document per user. Holds at most one
/// line per book; adding the same book again merges into the existing line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: UserId,
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart for `user_id`. What a cart read hands out when no
    /// document exists yet.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn find_line(&self, book_id: &BookId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.book_id == book_id)
    }

    /// Merges `line` into the cart.
    ///
    /// An existing line for the same book gains the incoming quantity and
    /// keeps its original `price_at_added`; a new book gets its own line at
    /// the end. Quantities never replace each other, they add.
    pub fn upsert_line(&mut self, line: CartLine) {
        match self
            .lines
            .iter_mut()
            .find(|existing| existing.book_id == line.book_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => self.lines.push(line),
        }
    }

    /// Sets the quantity of the line for `book_id`.
    /// Returns `false` when no such line exists.
    pub fn set_line_quantity(&mut self, book_id: &BookId, quantity: u32) -> bool {
        match self
            .lines
            .iter_mut()
            .find(|line| &line.book_id == book_id)
        {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Drops the line for `book_id`, leaving every other line untouched.
    /// Returns `false` when no such line existed.
    pub fn remove_line(&mut self, book_id: &BookId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.book_id != book_id);
        self.lines.len() < before
    }

    /// Cart total: sum of `price_at_added * quantity` over every line.
    /// Empty carts total 0.
    pub fn total(&self) -> u64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

/// Clamps a requested quantity to the storable range.
/// Zero and negative requests floor to 1.
pub fn clamp_quantity(requested: i64) -> u32 {
    requested.clamp(1, u32::MAX as i64) as u32
}

/// Payload for creating a cart document.
#[derive(Debug, Clone)]
pub struct CartCreate {
    pub lines: Vec<CartLine>,
}

/// Payload for rewriting a cart document.
///
/// The line list is replaced as a whole; there are no per-line writes. This
/// keeps a cart mutation a single-document operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartUpdate {
    pub lines: Option<Vec<CartLine>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(book_id: &str, price: u64, quantity: u32) -> CartLine {
        CartLine {
            book_id: BookId::from(book_id),
            book_title: format!("Title of {book_id}"),
            author: "Author".to_string(),
            category: "Fiction".to_string(),
            cover_image_url: "https://covers.example/1.jpg".to_string(),
            description: "A book".to_string(),
            price_at_added: price,
            quantity,
        }
    }

    #[test]
    fn merging_same_book_sums_quantities() {
        let mut cart = Cart::empty(UserId::from("user_1"));
        cart.upsert_line(line("book_1", 10000, 1));
        cart.upsert_line(line("book_1", 10000, 2));

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 3);
    }

    #[test]
    fn merging_keeps_the_price_captured_first() {
        let mut cart = Cart::empty(UserId::from("user_1"));
        cart.upsert_line(line("book_1", 10000, 1));
        // Same book added again after a catalog price change
        cart.upsert_line(line("book_1", 12000, 1));

        assert_eq!(cart.lines[0].price_at_added, 10000);
        assert_eq!(cart.total(), 20000);
    }

    #[test]
    fn distinct_books_get_their_own_lines() {
        let mut cart = Cart::empty(UserId::from("user_1"));
        cart.upsert_line(line("book_1", 10000, 1));
        cart.upsert_line(line("book_2", 5000, 1));

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].book_id, BookId::from("book_1"));
        assert_eq!(cart.lines[1].book_id, BookId::from("book_2"));
    }

    #[test]
    fn total_multiplies_captured_price_by_quantity() {
        let mut cart = Cart::empty(UserId::from("user_1"));
        cart.upsert_line(line("book_1", 10000, 2));
        cart.upsert_line(line("book_2", 5000, 1));

        assert_eq!(cart.total(), 25000);
        assert_eq!(Cart::empty(UserId::from("user_2")).total(), 0);
    }

    #[test]
    fn set_quantity_reports_missing_lines() {
        let mut cart = Cart::empty(UserId::from("user_1"));
        cart.upsert_line(line("book_1", 10000, 1));

        assert!(cart.set_line_quantity(&BookId::from("book_1"), 5));
        assert_eq!(cart.lines[0].quantity, 5);
        assert!(!cart.set_line_quantity(&BookId::from("book_9"), 5));
    }

    #[test]
    fn remove_line_leaves_other_lines_untouched() {
        let mut cart = Cart::empty(UserId::from("user_1"));
        cart.upsert_line(line("book_1", 10000, 2));
        cart.upsert_line(line("book_2", 5000, 1));

        assert!(cart.remove_line(&BookId::from("book_1")));
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].book_id, BookId::from("book_2"));
        assert_eq!(cart.lines[0].quantity, 1);

        assert!(!cart.remove_line(&BookId::from("book_1")));
    }

    #[test]
    fn quantities_clamp_to_at_least_one() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-5), 1);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(7), 7);
        assert_eq!(clamp_quantity(i64::MAX), u32::MAX);
    }
}
