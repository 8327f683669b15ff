use crate::model::{Book, CartLine, CheckoutId, Order, OrderCreate, OrderId, Recipient};
use crate::orders::{CheckoutError, PartialCheckout};
use crate::session::Session;
use crate::store::CollectionClient;
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

/// What a successful checkout hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    /// The attempt id stamped on every created order.
    pub checkout_id: CheckoutId,
    /// Created order ids, one per cart line, in input order.
    pub order_ids: Vec<OrderId>,
}

/// Builds order documents from cart lines or a direct purchase.
///
/// Validation runs before any write: an invalid recipient or empty input
/// never reaches the store. Once writing starts, each line becomes its own
/// order document in sequence; a mid-run store failure leaves the earlier
/// orders in place and reports exactly where the run stopped. Orders are
/// never rolled back here.
#[derive(Clone)]
pub struct OrderBuilder {
    orders: CollectionClient<Order>,
}

impl OrderBuilder {
    pub fn new(orders: CollectionClient<Order>) -> Self {
        Self { orders }
    }

    /// Creates one Pending order per cart line, each priced at the line's
    /// captured price times its quantity.
    ///
    /// Clearing the cart afterwards is the caller's step; order creation and
    /// cart clearing are not transactional.
    #[instrument(skip(self, lines, recipient), fields(user_id = %session.user_id, lines = lines.len()))]
    pub async fn checkout_cart_lines(
        &self,
        session: &Session,
        lines: &[CartLine],
        recipient: &Recipient,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        recipient.validate()?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCheckout);
        }

        let checkout_id = CheckoutId::new();
        info!(%checkout_id, "Creating orders");

        let mut created = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            let params = OrderCreate {
                user_id: session.user_id.clone(),
                book_id: line.book_id.clone(),
                book_title: line.book_title.clone(),
                book_image_url: line.cover_image_url.clone(),
                quantity: line.quantity,
                total_price: line.subtotal(),
                recipient: recipient.clone(),
                order_date: Utc::now(),
                checkout_id,
            };
            match self.orders.create(params).await {
                Ok(order_id) => created.push(order_id),
                Err(source) => {
                    warn!(%checkout_id, index, "Order creation failed mid-checkout");
                    if created.is_empty() {
                        // Nothing was written; a plain store error tells the
                        // caller the attempt is safe to redo.
                        return Err(CheckoutError::Store(source));
                    }
                    return Err(CheckoutError::Partial(PartialCheckout {
                        checkout_id,
                        created,
                        failed_book_id: line.book_id.clone(),
                        failed_index: index,
                        source,
                        unattempted: lines[index + 1..]
                            .iter()
                            .map(|l| l.book_id.clone())
                            .collect(),
                    }));
                }
            }
        }

        Ok(CheckoutReceipt {
            checkout_id,
            order_ids: created,
        })
    }

    /// Creates a single order for `quantity` copies of `book` at its current
    /// catalog price. No cart involved.
    #[instrument(skip(self, book, recipient), fields(user_id = %session.user_id, book_id = %book.id))]
    pub async fn direct_purchase(
        &self,
        session: &Session,
        book: &Book,
        quantity: u32,
        recipient: &Recipient,
    ) -> Result<OrderId, CheckoutError> {
        recipient.validate()?;
        if quantity == 0 {
            return Err(CheckoutError::ZeroQuantity);
        }

        let checkout_id = CheckoutId::new();
        debug!(%checkout_id, "Sending request");
        let params = OrderCreate {
            user_id: session.user_id.clone(),
            book_id: book.id.clone(),
            book_title: book.title.clone(),
            book_image_url: book.cover_image_url.clone(),
            quantity,
            total_price: book.price * quantity as u64,
            recipient: recipient.clone(),
            order_date: Utc::now(),
            checkout_id,
        };
        self.orders
            .create(params)
            .await
            .map_err(CheckoutError::Store)
    }
}
