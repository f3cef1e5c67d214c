//! Resource-specific clients over the generic [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client maps framework errors into its resource's error type and implements the store
//! trait the [`reconciler`](crate::reconciler) depends on. `get`, `delete` and `list` come from
//! [`ActorClient`](actor_framework::ActorClient).

pub mod order_client;
pub mod product_client;

pub use order_client::OrderClient;
pub use product_client::ProductClient;
