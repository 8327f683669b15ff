//! Pure data structures (DTOs) implementing the [`Document`](crate::store::Document) trait.

pub mod book;
pub mod cart;
pub mod order;
pub mod review;

pub use book::*;
pub use cart::*;
pub use order::*;
pub use review::*;
