//! # Order Actor
//!
//! Stores reconciled orders. Stock bookkeeping happens before an order reaches this actor (see
//! [`crate::reconciler`]), so the actor has no dependencies and its context is `()`.
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`], shared by the whole order flow

pub mod entity;
pub mod error;

pub use entity::OrderAction;
pub use error::*;

use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
