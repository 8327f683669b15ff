//! Error types for order building and order history.

use crate::model::{BookId, CheckoutId, OrderId, OrderStatus, RecipientError};
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur while reading or deleting orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Deletion is only allowed once an order has been delivered.
    #[error("Order {id} cannot be deleted while {status}")]
    InvalidState { id: OrderId, status: OrderStatus },

    /// An underlying store error occurred.
    #[error("Order store error: {0}")]
    Store(StoreError),
}

impl OrderError {
    /// Maps raw store failures onto order terms.
    pub(crate) fn from_store(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::Store(other),
        }
    }
}

/// What a failed multi-line checkout left behind.
///
/// Orders already written are never rolled back; this carries everything a
/// caller needs to reconcile, retry, or refund by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialCheckout {
    /// The attempt whose orders these are.
    pub checkout_id: CheckoutId,
    /// Orders successfully written before the failure, in creation order.
    pub created: Vec<OrderId>,
    /// The book whose order creation failed.
    pub failed_book_id: BookId,
    /// Zero-based position of the failed line in the checkout input.
    pub failed_index: usize,
    /// The store error that stopped the run.
    pub source: StoreError,
    /// Books after the failed line, never attempted.
    pub unattempted: Vec<BookId>,
}

/// Errors that can occur during checkout.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// The recipient failed validation; nothing was written.
    #[error(transparent)]
    InvalidRecipient(#[from] RecipientError),

    /// A cart checkout needs at least one line.
    #[error("Checkout requires at least one cart line")]
    EmptyCheckout,

    /// A direct purchase needs a positive quantity.
    #[error("Purchase quantity must be at least 1")]
    ZeroQuantity,

    /// The store failed after some orders were already written.
    #[error(
        "Checkout {id} stopped at line {index}: {created} orders created, {skipped} never attempted: {source}",
        id = .0.checkout_id,
        index = .0.failed_index,
        created = .0.created.len(),
        skipped = .0.unattempted.len(),
        source = .0.source,
    )]
    Partial(PartialCheckout),

    /// The store failed before any order was written.
    #[error("Checkout store error: {0}")]
    Store(StoreError),
}
