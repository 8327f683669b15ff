//! Runtime lifecycle: system wiring, startup, shutdown, and tracing setup.

pub mod shop_system;
pub mod tracing;

pub use shop_system::ShopSystem;
