//! # Bookshop Demo
//!
//! A walkthrough of the shop system end to end.
//!
//! ## 🚀 What it shows
//!
//! 1. Setting up the [`ShopSystem`] and its four collections.
//! 2. Seeding the catalog and filling a cart (adding the same book twice
//!    merges into one line).
//! 3. Checking out the cart into one order per line, then clearing the cart.
//! 4. External fulfillment advancing an order until it may be deleted.
//! 5. Posting a review.
//!
//! Run with `RUST_LOG=info cargo run` to watch the request flow.

use bookshop::lifecycle::tracing::setup_tracing;
use bookshop::lifecycle::ShopSystem;
use bookshop::model::{BookCreate, CartLine, OrderStatus, OrderUpdate, Recipient};
use bookshop::session::Session;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting bookshop system");

    let system = ShopSystem::new();
    let session = Session::new("user_1");

    // Seed the catalog
    let span = tracing::info_span!("catalog_seed");
    let (first_book, second_book) = async {
        info!("Seeding catalog");
        let first = system
            .catalog
            .add_book(BookCreate {
                title: "The Rust Programming Language".to_string(),
                author: "Steve Klabnik".to_string(),
                category: "Programming".to_string(),
                cover_image_url: "https://covers.example/trpl.jpg".to_string(),
                description: "The official book on Rust".to_string(),
                price: 10000,
            })
            .await
            .map_err(|e| e.to_string())?;
        let second = system
            .catalog
            .add_book(BookCreate {
                title: "The Little Prince".to_string(),
                author: "Antoine de Saint-Exupery".to_string(),
                category: "Fiction".to_string(),
                cover_image_url: "https://covers.example/prince.jpg".to_string(),
                description: "A pilot meets a small prince in the desert".to_string(),
                price: 5000,
            })
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((first, second))
    }
    .instrument(span)
    .await?;

    // Fill the cart: the same book twice merges into a single line
    let book = system
        .catalog
        .book(first_book.clone())
        .await
        .map_err(|e| e.to_string())?;
    system
        .cart
        .add_line(&session, CartLine::for_book(&book, 1))
        .await
        .map_err(|e| e.to_string())?;
    system
        .cart
        .add_line(&session, CartLine::for_book(&book, 1))
        .await
        .map_err(|e| e.to_string())?;

    let other = system
        .catalog
        .book(second_book.clone())
        .await
        .map_err(|e| e.to_string())?;
    let cart = system
        .cart
        .add_line(&session, CartLine::for_book(&other, 1))
        .await
        .map_err(|e| e.to_string())?;

    info!(lines = cart.lines.len(), total = cart.total(), "Cart filled");

    // Checkout: one Pending order per cart line
    let recipient = Recipient::new("Alice Kim", "12 Main St, Springfield", "0123456789");
    let span = tracing::info_span!("checkout");
    let receipt = async {
        info!("Checking out cart");
        let cart = system
            .cart
            .get_cart(&session)
            .await
            .map_err(|e| e.to_string())?;
        system
            .checkout
            .checkout_cart_lines(&session, &cart.lines, &recipient)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(
        checkout_id = %receipt.checkout_id,
        orders = receipt.order_ids.len(),
        "Checkout complete"
    );

    // Orders exist now; the cart's job is done
    system
        .cart
        .clear_cart(&session)
        .await
        .map_err(|e| e.to_string())?;

    // External fulfillment advances the first order step by step
    let delivered_id = receipt
        .order_ids
        .first()
        .cloned()
        .ok_or_else(|| "Checkout created no orders".to_string())?;
    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
    ] {
        system
            .fulfillment
            .update(
                delivered_id.clone(),
                OrderUpdate {
                    status: Some(status),
                },
            )
            .await
            .map_err(|e| e.to_string())?;
    }

    // Once delivered, the order may leave the history
    let order = system
        .orders
        .order(delivered_id.clone())
        .await
        .map_err(|e| e.to_string())?;
    match system
        .orders
        .delete_order(&session, delivered_id, order.status)
        .await
    {
        Ok(()) => info!("Delivered order removed from history"),
        Err(e) => error!(error = %e, "Delete failed"),
    }

    // Post a review for the book that arrived
    let review_id = system
        .reviews
        .add_review(
            &session,
            first_book,
            "Loved it. The ownership chapter finally clicked.",
        )
        .await
        .map_err(|e| e.to_string())?;
    info!(review_id = %review_id, "Review posted");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
