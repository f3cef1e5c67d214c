//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored resource (Product, Order, …) implements
//! to be managed by the generic `ResourceActor`. It fixes the associated types for IDs, DTOs,
//! list filters, actions, context and errors, and provides the lifecycle hooks
//! (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Identity
//! Most resources let the actor hand out IDs from its counter. Resources that carry a business
//! identifier chosen by the caller (a product's catalogue number, for example) return it from
//! [`ActorEntity::requested_id`]; the actor then uses that ID and rejects duplicates with
//! [`FrameworkError::AlreadyExists`](crate::FrameworkError::AlreadyExists).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::requested_id`]
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! The defaults do nothing (`None` / `Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await other actors. The `Context` type is injected
/// into every hook at `run()` time, which lets dependencies be wired after construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation, and ordered so listings
    /// come back in a stable order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Filter applied by `List` requests. Use `()` to list everything.
    type Query: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `AdjustStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    type Context: Send + Sync;

    /// Per-actor error type. Errors returned from hooks are boxed into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) and can be downcast
    /// back by the resource's client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Caller-assigned identifier carried by the create payload, if any.
    fn requested_id(_params: &Self::Create) -> Option<Self::Id> {
        None
    }

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity is selected by a `List` filter.
    fn matches(&self, query: &Self::Query) -> bool;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
