//! Type-safe wrappers around [`CollectionClient`](crate::store::CollectionClient).

pub mod cart_repository;
pub mod catalog;
pub mod order_builder;
pub mod order_history;
pub mod review_client;

pub use cart_repository::*;
pub use catalog::*;
pub use order_builder::*;
pub use order_history::*;
pub use review_client::*;
