//! Custom actions for the Product actor.
//!
//! These actions are handled by
//! [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action) on
//! [`Product`](crate::model::Product).

/// Custom actions for Product entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Adds `delta` to the stock level (negative to take stock).
    ///
    /// # Errors
    /// Fails with `InsufficientStock` if the result would be negative; the stock is unchanged.
    AdjustStock(i64),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level.
    CheckStock(u32),
    /// Stock level after the adjustment.
    AdjustStock(u32),
}
