use crate::model::BookId;
use crate::session::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;
use uuid::Uuid;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier shared by every order written in one checkout attempt.
///
/// A retried checkout is a new attempt with a new id, so duplicate orders
/// from client-level retries stay detectable and attributable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckoutId(pub Uuid);

impl CheckoutId {
    /// A fresh attempt id.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for CheckoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display states for the integer status codes persisted on orders.
///
/// Codes are advanced by external fulfillment; this subsystem only reads
/// them. Any code outside 0..=3 classifies as [`OrderStatus::Unknown`] so a
/// bad write renders as such instead of breaking a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipping,
    Delivered,
    Unknown(i64),
}

impl OrderStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Pending,
            1 => Self::Confirmed,
            2 => Self::Shipping,
            3 => Self::Delivered,
            other => Self::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Pending => 0,
            Self::Confirmed => 1,
            Self::Shipping => 2,
            Self::Delivered => 3,
            Self::Unknown(code) => *code,
        }
    }

    /// Human-readable state name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Shipping => "Shipping",
            Self::Delivered => "Delivered",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl From<i64> for OrderStatus {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl From<OrderStatus> for i64 {
    fn from(status: OrderStatus) -> i64 {
        status.code()
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Delivery contact details captured on every order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Why a recipient was refused at checkout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipientError {
    #[error("Recipient name must not be blank")]
    MissingName,
    #[error("Recipient address must not be blank")]
    MissingAddress,
    #[error("Recipient phone must not be blank")]
    MissingPhone,
    #[error("Recipient phone must be 10 or 11 digits, got '{0}'")]
    InvalidPhone(String),
}

impl Recipient {
    /// Creates a new Recipient instance.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }

    /// Checks the fields an order may be written with: every field non-blank
    /// and a phone of exactly 10 or 11 ASCII digits.
    pub fn validate(&self) -> Result<(), RecipientError> {
        if self.name.trim().is_empty() {
            return Err(RecipientError::MissingName);
        }
        if self.address.trim().is_empty() {
            return Err(RecipientError::MissingAddress);
        }
        if self.phone.trim().is_empty() {
            return Err(RecipientError::MissingPhone);
        }
        let digits_only = self.phone.chars().all(|c| c.is_ascii_digit());
        if !digits_only || !(10..=11).contains(&self.phone.len()) {
            return Err(RecipientError::InvalidPhone(self.phone.clone()));
        }
        Ok(())
    }
}

/// A persisted order: one per book line, never aggregated across books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub book_title: String,
    pub book_image_url: String,
    pub quantity: u32,
    /// In the smallest currency unit: unit price times quantity at order time.
    pub total_price: u64,
    pub recipient: Recipient,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub checkout_id: CheckoutId,
}

/// Payload for creating an order.
///
/// Carries no status field: new orders always start Pending.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub book_id: BookId,
    pub book_title: String,
    pub book_image_url: String,
    pub quantity: u32,
    pub total_price: u64,
    pub recipient: Recipient,
    pub order_date: DateTime<Utc>,
    pub checkout_id: CheckoutId,
}

/// Payload for updating an order. Only the status moves after creation, and
/// only external fulfillment moves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
}

/// Field-equality filter over orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub user_id: Option<UserId>,
    pub checkout_id: Option<CheckoutId>,
}

impl OrderFilter {
    /// Everything a user has ordered.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Everything one checkout attempt wrote.
    pub fn for_checkout(checkout_id: CheckoutId) -> Self {
        Self {
            checkout_id: Some(checkout_id),
            ..Self::default()
        }
    }
}
