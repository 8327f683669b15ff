use crate::model::{Order, OrderFilter, OrderId, OrderStatus};
use crate::orders::OrderError;
use crate::session::Session;
use crate::store::{CollectionClient, StoreClient, StoreError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Read-and-delete client for a user's order history.
///
/// Status codes on fetched orders are advanced by external fulfillment; the
/// pure functions in [`crate::orders::projection`] turn a fetched set into
/// the filtered and sorted views. The only write this client issues is the
/// delivered-order delete.
#[derive(Clone)]
pub struct OrderHistory {
    inner: CollectionClient<Order>,
}

impl OrderHistory {
    pub fn new(inner: CollectionClient<Order>) -> Self {
        Self { inner }
    }

    /// Every order the user has placed, in store order. Callers sort.
    #[instrument(skip(self), fields(user_id = %session.user_id))]
    pub async fn orders_for_user(&self, session: &Session) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner
            .query(OrderFilter::for_user(session.user_id.clone()))
            .await
            .map_err(OrderError::from_store)
    }

    /// Point read for an order confirmation view.
    #[instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        let versioned = StoreClient::get(self, id.clone()).await?;
        versioned
            .map(|v| v.doc)
            .ok_or_else(|| OrderError::NotFound(id.0))
    }

    /// Deletes an order from the history. Only delivered orders may go;
    /// anything still moving is refused without touching the store.
    #[instrument(skip(self), fields(user_id = %session.user_id))]
    pub async fn delete_order(
        &self,
        session: &Session,
        id: OrderId,
        current_status: OrderStatus,
    ) -> Result<(), OrderError> {
        if current_status != OrderStatus::Delivered {
            return Err(OrderError::InvalidState {
                id,
                status: current_status,
            });
        }
        debug!("Sending request");
        self.inner.delete(id).await.map_err(OrderError::from_store)
    }
}

#[async_trait]
impl StoreClient<Order> for OrderHistory {
    type Error = OrderError;

    fn collection(&self) -> &CollectionClient<Order> {
        &self.inner
    }

    fn map_store_error(e: StoreError) -> Self::Error {
        OrderError::from_store(e)
    }
}
