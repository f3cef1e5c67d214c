//! # Product Actor
//!
//! The Product resource actor: the product catalogue plus quantity-on-hand.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! Stock is never overwritten by the order flow. It moves by relative adjustments, checked and
//! applied inside one actor turn, so two orders racing for the last unit cannot both win:
//!
//! ```rust,ignore
//! // Current stock level (read-only)
//! let stock = product_client.check_stock(product_id).await?;
//!
//! // Take 4 units; fails with InsufficientStock instead of going negative
//! let left = product_client.adjust_stock(product_id, -4).await?;
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, generic_client) = product_actor::new(32);
//! let client = ProductClient::new(generic_client);
//! tokio::spawn(actor.run(()));
//!
//! client.create_product(ProductCreate::new(ProductId(7), "Widget", 100, 29.99)).await?;
//! client.adjust_stock(ProductId(7), -5).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
