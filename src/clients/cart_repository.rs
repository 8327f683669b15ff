use crate::carts::CartError;
use crate::model::{clamp_quantity, BookId, Cart, CartCreate, CartLine, CartUpdate};
use crate::session::Session;
use crate::store::{CollectionClient, StoreError};
use tracing::{debug, instrument, warn};

/// How many times a cart mutation re-reads and retries after losing a
/// revision race before giving up.
const MERGE_RETRY_LIMIT: usize = 3;

/// Repository for the carts collection: one document per user, rewritten as
/// a whole on every mutation.
///
/// All mutations are read-modify-write over the full line list, guarded by
/// the cart's revision. Two racing writers cannot silently drop each other's
/// lines: the loser sees a revision conflict, re-reads, and reapplies its
/// change, up to [`MERGE_RETRY_LIMIT`] rounds. The expected client is a
/// single user's session, so the retry budget is small.
#[derive(Clone)]
pub struct CartRepository {
    inner: CollectionClient<Cart>,
}

impl CartRepository {
    pub fn new(inner: CollectionClient<Cart>) -> Self {
        Self { inner }
    }

    /// Merges a line into the user's cart, creating the cart document on
    /// first use.
    ///
    /// Adding a book already in the cart adds quantities into its existing
    /// line and keeps the price captured when the book first went in.
    #[instrument(skip(self, line), fields(user_id = %session.user_id, book_id = %line.book_id))]
    pub async fn add_line(&self, session: &Session, line: CartLine) -> Result<Cart, CartError> {
        debug!("Sending request");
        for _attempt in 0..MERGE_RETRY_LIMIT {
            let existing = self
                .inner
                .get(session.user_id.clone())
                .await
                .map_err(CartError::from_store)?;

            match existing {
                None => {
                    // First line ever: claim the key. Losing the claim means
                    // another writer created the cart first; re-read and merge.
                    let create = CartCreate {
                        lines: vec![line.clone()],
                    };
                    match self.inner.insert(session.user_id.clone(), create).await {
                        Ok(()) => {
                            return Ok(Cart {
                                user_id: session.user_id.clone(),
                                lines: vec![line],
                            })
                        }
                        Err(StoreError::AlreadyExists(_)) => {
                            warn!("Cart appeared mid-create, retrying");
                            continue;
                        }
                        Err(e) => return Err(CartError::from_store(e)),
                    }
                }
                Some(versioned) => {
                    let mut cart = versioned.doc;
                    cart.upsert_line(line.clone());
                    let update = CartUpdate {
                        lines: Some(cart.lines),
                    };
                    match self
                        .inner
                        .update_if(session.user_id.clone(), versioned.version, update)
                        .await
                    {
                        Ok(saved) => return Ok(saved),
                        Err(StoreError::Conflict { .. }) => {
                            warn!("Cart revision moved, retrying");
                            continue;
                        }
                        Err(e) => return Err(CartError::from_store(e)),
                    }
                }
            }
        }
        Err(CartError::ConcurrentlyModified)
    }

    /// Sets the quantity of the line for `book_id`. Zero and negative
    /// requests clamp to 1; the quantity floor never leaves this module.
    #[instrument(skip(self), fields(user_id = %session.user_id))]
    pub async fn set_line_quantity(
        &self,
        session: &Session,
        book_id: &BookId,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        let quantity = clamp_quantity(quantity);
        for _attempt in 0..MERGE_RETRY_LIMIT {
            let versioned = self
                .inner
                .get(session.user_id.clone())
                .await
                .map_err(CartError::from_store)?
                .ok_or_else(|| CartError::CartNotFound(session.user_id.0.clone()))?;

            let mut cart = versioned.doc;
            if !cart.set_line_quantity(book_id, quantity) {
                return Err(CartError::LineNotFound(book_id.0.clone()));
            }
            let update = CartUpdate {
                lines: Some(cart.lines),
            };
            match self
                .inner
                .update_if(session.user_id.clone(), versioned.version, update)
                .await
            {
                Ok(saved) => return Ok(saved),
                Err(StoreError::Conflict { .. }) => {
                    warn!("Cart revision moved, retrying");
                    continue;
                }
                Err(e) => return Err(CartError::from_store(e)),
            }
        }
        Err(CartError::ConcurrentlyModified)
    }

    /// Drops the line for `book_id` and persists the remaining lines
    /// untouched. Removing a book that is not in the cart persists the
    /// lines unchanged.
    #[instrument(skip(self), fields(user_id = %session.user_id))]
    pub async fn remove_line(
        &self,
        session: &Session,
        book_id: &BookId,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        for _attempt in 0..MERGE_RETRY_LIMIT {
            let versioned = self
                .inner
                .get(session.user_id.clone())
                .await
                .map_err(CartError::from_store)?
                .ok_or_else(|| CartError::CartNotFound(session.user_id.0.clone()))?;

            let mut cart = versioned.doc;
            cart.remove_line(book_id);
            let update = CartUpdate {
                lines: Some(cart.lines),
            };
            match self
                .inner
                .update_if(session.user_id.clone(), versioned.version, update)
                .await
            {
                Ok(saved) => return Ok(saved),
                Err(StoreError::Conflict { .. }) => {
                    warn!("Cart revision moved, retrying");
                    continue;
                }
                Err(e) => return Err(CartError::from_store(e)),
            }
        }
        Err(CartError::ConcurrentlyModified)
    }

    /// The user's cart, or an empty one when no document exists yet.
    #[instrument(skip(self), fields(user_id = %session.user_id))]
    pub async fn get_cart(&self, session: &Session) -> Result<Cart, CartError> {
        debug!("Sending request");
        let versioned = self
            .inner
            .get(session.user_id.clone())
            .await
            .map_err(CartError::from_store)?;
        Ok(versioned
            .map(|v| v.doc)
            .unwrap_or_else(|| Cart::empty(session.user_id.clone())))
    }

    /// Empties the cart by deleting its document, the usual step after a
    /// successful checkout. Clearing a cart that never existed is a no-op.
    #[instrument(skip(self), fields(user_id = %session.user_id))]
    pub async fn clear_cart(&self, session: &Session) -> Result<(), CartError> {
        debug!("Sending request");
        match self.inner.delete(session.user_id.clone()).await {
            Ok(()) | Err(StoreError::NotFound(_)) => Ok(()),
            Err(e) => Err(CartError::from_store(e)),
        }
    }
}
