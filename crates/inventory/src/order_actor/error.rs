//! Error types for the Order actor and the order flow built on it.

use crate::envelope::HttpStatus;
use crate::model::ProductId;
use crate::product_actor::ProductError;
use actor_framework::FrameworkError;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// A line refers to a product that does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// There is insufficient stock to fulfill a line.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The stored price of a product cannot be used to price a line.
    #[error("Invalid price for {product_id}: {price}")]
    InvalidPrice { product_id: ProductId, price: f64 },

    /// Daily totals cannot be asked for a day that has not started yet.
    #[error("Date is in the future: {0}")]
    FutureDate(NaiveDate),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// Maps a framework error, recovering the typed error raised by the order entity.
    pub fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::InvalidPage(msg) => OrderError::Validation(msg),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|other| OrderError::ActorCommunicationError(other.to_string())),
        }
    }

    /// Translates a product store failure for the line that touched `product_id`.
    pub fn from_product(product_id: ProductId, e: ProductError) -> Self {
        match e {
            ProductError::NotFound(_) => OrderError::ProductNotFound(product_id),
            ProductError::InsufficientStock {
                requested,
                available,
            } => OrderError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            ProductError::Validation(msg) => OrderError::Validation(msg),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl HttpStatus for OrderError {
    fn status_code(&self) -> u16 {
        match self {
            OrderError::NotFound(_) | OrderError::ProductNotFound(_) => 404,
            OrderError::InsufficientStock { .. }
            | OrderError::FutureDate(_)
            | OrderError::Validation(_) => 400,
            OrderError::InvalidPrice { .. } | OrderError::ActorCommunicationError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_errors_keep_the_line_product() {
        let id = ProductId(3);
        assert_eq!(
            OrderError::from_product(id, ProductError::NotFound(id.to_string())),
            OrderError::ProductNotFound(id)
        );
        assert_eq!(
            OrderError::from_product(
                id,
                ProductError::InsufficientStock {
                    requested: 4,
                    available: 1
                }
            ),
            OrderError::InsufficientStock {
                product_id: id,
                requested: 4,
                available: 1
            }
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(OrderError::ProductNotFound(ProductId(1)).status_code(), 404);
        assert_eq!(
            OrderError::InvalidPrice {
                product_id: ProductId(1),
                price: f64::NAN
            }
            .status_code(),
            500
        );
        let day = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(OrderError::FutureDate(day).status_code(), 400);
    }
}
