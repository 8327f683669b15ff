use crate::clients::{CartRepository, CatalogClient, OrderBuilder, OrderHistory, ReviewClient};
use crate::model::Order;
use crate::store::CollectionClient;
use tracing::{error, info};

/// The runtime orchestrator for the bookshop backend.
///
/// `ShopSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping every collection actor
/// - **Dependency Wiring**: Handing each repository the collection client it needs
///
/// # Architecture
///
/// The system runs four collection actors, one per document collection:
/// - **books**: the catalog (ingest and point reads)
/// - **carts**: one cart document per user, keyed by user id
/// - **orders**: one document per ordered book line
/// - **reviews**: reader comments, one document per submission
///
/// The orders collection is shared by two consumers with different verbs:
/// [`OrderBuilder`] writes at checkout, [`OrderHistory`] reads and deletes.
/// Both hold clones of the same client, so all traffic still serializes
/// through the one collection task.
///
/// # Example
///
/// ```ignore
/// let system = ShopSystem::new();
/// let session = Session::new("user_1");
///
/// let book_id = system.catalog.add_book(params).await?;
/// let book = system.catalog.book(book_id).await?;
/// system.cart.add_line(&session, CartLine::for_book(&book, 1)).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct ShopSystem {
    /// Catalog ingest and point reads over the books collection
    pub catalog: CatalogClient,

    /// Cart mutations and reads over the carts collection
    pub cart: CartRepository,

    /// Checkout and direct purchase against the orders collection
    pub checkout: OrderBuilder,

    /// Order history reads and delivered-order deletes
    pub orders: OrderHistory,

    /// Review posting, edits, and author-only deletes
    pub reviews: ReviewClient,

    /// Raw handle to the orders collection, standing in for the external
    /// fulfillment process that advances order statuses
    pub fulfillment: CollectionClient<Order>,

    /// Task handles for all running collection actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Creates and initializes a new `ShopSystem` with all collections running.
    ///
    /// This method:
    /// 1. Creates the four collection stores and their id generators
    /// 2. Wraps the shared orders client for each of its consumers
    /// 3. Spawns each collection in its own Tokio task
    ///
    /// # Returns
    ///
    /// A fully initialized `ShopSystem` ready to accept requests.
    pub fn new() -> Self {
        // 1. Create the collections and their clients
        let (book_store, catalog) = crate::books::new();
        let (cart_store, cart) = crate::carts::new();
        let (order_store, order_client) = crate::orders::new();
        let (review_store, reviews) = crate::reviews::new();

        // 2. Two consumers share the orders collection
        let checkout = OrderBuilder::new(order_client.clone());
        let orders = OrderHistory::new(order_client.clone());

        // 3. Spawn each collection in its own task
        let handles = vec![
            tokio::spawn(book_store.run()),
            tokio::spawn(cart_store.run()),
            tokio::spawn(order_store.run()),
            tokio::spawn(review_store.run()),
        ];

        Self {
            catalog,
            cart,
            checkout,
            orders,
            reviews,
            fulfillment: order_client,
            handles,
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the collection channels; each store drains
    /// its mailbox, logs its final document count, and exits its loop. The
    /// method then waits for every collection task to finish.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all collections shut down cleanly
    /// - `Err(String)` if any collection task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Step 1: close all channels by dropping the clients. Every clone of
        // the orders client must go, or that collection would keep waiting.
        drop(self.catalog);
        drop(self.cart);
        drop(self.checkout);
        drop(self.orders);
        drop(self.reviews);
        drop(self.fulfillment);

        // Step 2: wait for the collection tasks to drain and finish
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Collection task failed: {:?}", e);
                return Err(format!("Collection task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
