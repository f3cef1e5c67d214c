//! Store seams the reconciler works against.
//!
//! [`ProductClient`](crate::clients::ProductClient) and [`OrderClient`](crate::clients::OrderClient)
//! implement these on top of the actors; tests can substitute a `MockClient`-backed client.

use crate::model::{Order, OrderId, OrderLine, Product, ProductId};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_business_id(&self, id: ProductId) -> Result<Option<Product>, ProductError>;

    /// Adds `delta` to the quantity on hand in one atomic step and returns the new quantity.
    /// Fails with `NotFound` if the product is absent and with `InsufficientStock` if the
    /// quantity would go negative; the quantity is unchanged in both cases.
    async fn adjust_quantity(&self, id: ProductId, delta: i64) -> Result<u32, ProductError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order created now.
    async fn create(&self, lines: Vec<OrderLine>, total_amount: f64) -> Result<Order, OrderError>;

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError>;

    /// Replaces the lines and total of an existing order.
    async fn update(
        &self,
        id: OrderId,
        lines: Vec<OrderLine>,
        total_amount: f64,
    ) -> Result<Order, OrderError>;

    async fn delete_by_id(&self, id: OrderId) -> Result<(), OrderError>;

    /// Sum of `total_amount` over orders created in `[start, end)`.
    async fn sum_totals_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64, OrderError>;
}
