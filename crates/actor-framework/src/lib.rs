//! # Actor Framework
//!
//! Building blocks for resource stores that run as actors on Tokio. Each resource type
//! (products, orders, …) is owned by exactly one [`ResourceActor`] task that processes a
//! uniform set of requests: Create, Get, Update, Delete, List, and resource-specific Actions.
//!
//! ## Why actors for a store?
//!
//! - State is owned by a single task, so there is no shared memory and no locks.
//! - Requests to one store are handled sequentially. A custom action that reads, checks and
//!   writes (for example "decrement stock only if enough is left") is atomic with respect to
//!   every other request on that store.
//! - Different stores run in parallel and talk to each other only through clients.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the domain type, its DTOs, list filter and hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and storage
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async requests
//!
//! ```rust,ignore
//! #[async_trait]
//! impl ActorEntity for Product {
//!     type Id = ProductId;
//!     type Create = ProductCreate;
//!     type Update = ProductUpdate;
//!     type Query = ProductQuery;
//!     type Action = ProductAction;
//!     type ActionResult = ProductActionResult;
//!     type Context = ();
//!     type Error = ProductError;
//!     // ...
//! }
//!
//! let (actor, client) = ResourceActor::<Product>::new(32);
//! tokio::spawn(actor.run(()));
//! let id = client.create(params).await?;
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at construction time, so
//! every actor and client can be created first and wired afterwards.
//!
//! ## Errors
//!
//! Each entity defines its own error type. Hook failures reach the caller boxed in
//! [`FrameworkError::EntityError`]; [`FrameworkError::downcast_entity`] recovers the typed error.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted expectations, which keeps
//! tests of client-side logic fast and deterministic. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod page;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use page::{Listing, PageRequest};
