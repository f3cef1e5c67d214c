//! # Inventory
//!
//! Products, orders, and the stock bookkeeping between them, built on the actor framework.
//!
//! - **[model]**: data types ([`Product`](model::Product), [`Order`](model::Order)) and the
//!   validated order request ([`OrderRequest`](model::OrderRequest) → [`LineItems`](model::LineItems))
//! - **[product_actor]** / **[order_actor]**: the two stores, one actor each
//! - **[clients]**: typed clients; they also implement the store traits of the reconciler
//! - **[reconciler]**: stock moves for order create, update and delete; daily totals
//! - **[service]**: the order lifecycle as callers use it
//! - **[lifecycle]**: starts, wires and stops everything
//! - **[config]** / **[envelope]**: environment settings and the JSON response shape
//!
//! ## Testing
//!
//! See [`actor_framework::mock`] for utilities to test clients without spawning full actors.

pub mod clients;
pub mod config;
pub mod envelope;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod reconciler;
pub mod service;
