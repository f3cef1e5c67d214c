//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>`; stock bookkeeping is done by the
//! [`InventoryReconciler`](crate::reconciler::InventoryReconciler) before orders get here.
use crate::model::{Order, OrderCreate, OrderId, OrderLine, OrderQuery, OrderUpdate};
use crate::order_actor::OrderError;
use crate::reconciler::OrderStore;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Persists an order with an explicit creation time.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.inner
            .create(params)
            .await
            .map_err(OrderError::from_framework)
    }

    #[instrument(skip(self))]
    pub async fn update_order(
        &self,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(OrderError::from_framework)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from_framework(e)
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    async fn create(&self, lines: Vec<OrderLine>, total_amount: f64) -> Result<Order, OrderError> {
        let id = self
            .create_order(OrderCreate {
                lines,
                total_amount,
                created_at: Utc::now(),
            })
            .await?;
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.get(id).await
    }

    async fn update(
        &self,
        id: OrderId,
        lines: Vec<OrderLine>,
        total_amount: f64,
    ) -> Result<Order, OrderError> {
        self.update_order(id, OrderUpdate { lines, total_amount })
            .await
    }

    async fn delete_by_id(&self, id: OrderId) -> Result<(), OrderError> {
        self.delete(id).await
    }

    async fn sum_totals_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64, OrderError> {
        let listing = self
            .list(OrderQuery::created_between(start, end), None)
            .await?;
        debug!(%start, %end, orders = listing.total, "Summing order totals");
        Ok(listing.items.iter().map(|order| order.total_amount).sum())
    }
}
