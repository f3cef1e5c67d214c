//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the actors of the inventory system.
//!
//! ## The InventorySystem Pattern
//!
//! [`InventorySystem`] is the conductor:
//!
//! ```rust,ignore
//! let config = InventoryConfig::from_env()?;
//! let system = InventorySystem::new(&config);
//!
//! system.product_client.create_product(ProductCreate::new(ProductId(7), "Widget", 10, 2.5)).await?;
//! let order = system.service.create_order(&request).await?;
//!
//! system.shutdown().await?;
//! ```
//!
//! 1. **Actor creation** - both actors and their clients, sized from the configuration
//! 2. **Wiring** - the reconciler and the order service get clones of the clients
//! 3. **Start** - each actor runs in its own Tokio task
//! 4. **Graceful shutdown** - clients are dropped and every actor task awaited
//!
//! ## Dependency Injection via Context
//!
//! Dependencies are injected at `run(context)`, not at construction. Neither store depends on
//! the other here (the reconciler talks to both from outside), so both run with `()`.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None` once queued requests are done
//! 3. **Await completion** - a panicked actor task is reported as an error
//!
//! Clones of a client keep its actor alive. Drop every clone you took from the system (and any
//! [`OrderService`](crate::service::OrderService) clone) before calling `shutdown`, or it waits.
//!
//! ## Observability
//!
//! Call [`setup_tracing`](actor_framework::tracing::setup_tracing) once at program start; see
//! the framework's `tracing` module for the log levels.

pub mod inventory_system;

pub use inventory_system::*;
