//! Error types for the Product actor.

use crate::envelope::HttpStatus;
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// A product with this catalogue number is already registered.
    #[error("Product already exists: {0}")]
    AlreadyExists(String),

    /// The adjustment would take the stock below zero.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The product data or listing request is invalid.
    #[error("Product validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    /// Maps a framework error, recovering the typed error raised by the product entity.
    pub fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::AlreadyExists(id) => ProductError::AlreadyExists(id),
            FrameworkError::InvalidPage(msg) => ProductError::Validation(msg),
            other => other
                .downcast_entity::<ProductError>()
                .unwrap_or_else(|other| ProductError::ActorCommunicationError(other.to_string())),
        }
    }
}

impl HttpStatus for ProductError {
    fn status_code(&self) -> u16 {
        match self {
            ProductError::NotFound(_) => 404,
            ProductError::AlreadyExists(_)
            | ProductError::InsufficientStock { .. }
            | ProductError::Validation(_) => 400,
            ProductError::ActorCommunicationError(_) => 500,
        }
    }
}
