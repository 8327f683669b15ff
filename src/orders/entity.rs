//! Document trait implementation for the Order type.
//!
//! Orders are written once at checkout and then advanced by external
//! fulfillment. The update hook holds the status line: transitions only move
//! forward through the known codes, and a write can never park an order on a
//! code the projection would classify as Unknown.

use crate::model::{Order, OrderCreate, OrderFilter, OrderId, OrderStatus, OrderUpdate};
use crate::store::Document;

impl Document for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Filter = OrderFilter;

    /// New orders always start Pending; the create payload has no say.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, String> {
        if params.quantity == 0 {
            return Err("Order quantity must be at least 1".to_string());
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            book_id: params.book_id,
            book_title: params.book_title,
            book_image_url: params.book_image_url,
            quantity: params.quantity,
            total_price: params.total_price,
            recipient: params.recipient,
            order_date: params.order_date,
            status: OrderStatus::Pending,
            checkout_id: params.checkout_id,
        })
    }

    fn apply_update(&mut self, update: OrderUpdate) -> Result<(), String> {
        if let Some(next) = update.status {
            if let OrderStatus::Unknown(code) = next {
                return Err(format!("Unknown order status code: {}", code));
            }
            if next.code() < self.status.code() {
                return Err(format!(
                    "Order status cannot move backwards: {} -> {}",
                    self.status, next
                ));
            }
            self.status = next;
        }
        Ok(())
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.user_id.as_ref().is_none_or(|u| &self.user_id == u)
            && filter
                .checkout_id
                .is_none_or(|c| self.checkout_id == c)
    }
}
