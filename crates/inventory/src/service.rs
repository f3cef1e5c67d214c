//! # Order Service
//!
//! The order lifecycle as callers see it. Each operation validates its input once, lets the
//! [`InventoryReconciler`] move the stock, then persists the order. If persisting fails after
//! stock has moved, the stock movement is undone.

use crate::clients::{OrderClient, ProductClient};
use crate::config::DEFAULT_PAGE_LIMIT;
use crate::model::{LineItems, Order, OrderId, OrderLine, OrderQuery, OrderRequest, Product};
use crate::order_actor::OrderError;
use crate::reconciler::{InventoryReconciler, OrderStore, ProductStore, ReleaseReport};
use actor_framework::{ActorClient, Listing, PageRequest};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{error, info, instrument};

/// An order line together with the product it refers to, if that product still exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDetails {
    #[serde(flatten)]
    pub line: OrderLine,
    pub product: Option<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    pub id: OrderId,
    pub items: Vec<LineDetails>,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct OrderService {
    reconciler: InventoryReconciler<ProductClient, OrderClient>,
    page_limit: u32,
}

impl OrderService {
    pub fn new(reconciler: InventoryReconciler<ProductClient, OrderClient>) -> Self {
        Self {
            reconciler,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Page size used when `list_orders` is called without a page.
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn reconciler(&self) -> &InventoryReconciler<ProductClient, OrderClient> {
        &self.reconciler
    }

    /// Validates the request, takes stock for every line and stores the priced order.
    #[instrument(skip(self, request))]
    pub async fn create_order(&self, request: &OrderRequest) -> Result<Order, OrderError> {
        let lines = request.validate()?;
        let priced = self.reconciler.apply(&lines).await?;

        match self
            .reconciler
            .orders()
            .create(priced.lines.clone(), priced.total_amount)
            .await
        {
            Ok(order) => {
                info!(order_id = %order.id, total_amount = order.total_amount, "Order created");
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Storing order failed, returning stock");
                if let Err(undo) = self.reconciler.release(&priced.lines).await {
                    error!(error = %undo, "Returning stock failed");
                }
                Err(e)
            }
        }
    }

    /// The order with the current details of every product it refers to.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<OrderDetails, OrderError> {
        let order = self.load(id).await?;

        let mut items = Vec::with_capacity(order.lines.len());
        for line in order.lines {
            let product = self
                .reconciler
                .products()
                .find_by_business_id(line.product_id)
                .await
                .map_err(|e| OrderError::from_product(line.product_id, e))?;
            items.push(LineDetails { line, product });
        }

        Ok(OrderDetails {
            id: order.id,
            items,
            total_amount: order.total_amount,
            created_at: order.created_at,
        })
    }

    /// One page of orders, oldest first. Page or limit below 1 is a `Validation` error.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, page: Option<PageRequest>) -> Result<Listing<Order>, OrderError> {
        let page = page.unwrap_or(PageRequest::new(1, self.page_limit));
        self.reconciler
            .orders()
            .list(OrderQuery::all(), Some(page))
            .await
    }

    /// Replaces the lines of an order, moving stock for the difference and repricing.
    #[instrument(skip(self, request))]
    pub async fn update_order(
        &self,
        id: OrderId,
        request: &OrderRequest,
    ) -> Result<Order, OrderError> {
        let lines = request.validate()?;
        let order = self.load(id).await?;
        let priced = self.reconciler.reconcile(&order.lines, &lines).await?;

        match self
            .reconciler
            .orders()
            .update(id, priced.lines.clone(), priced.total_amount)
            .await
        {
            Ok(updated) => {
                info!(order_id = %id, total_amount = updated.total_amount, "Order updated");
                Ok(updated)
            }
            Err(e) => {
                error!(order_id = %id, error = %e, "Storing order update failed, reverting stock");
                let undo = match LineItems::from_order_lines(&order.lines) {
                    Ok(previous) => self
                        .reconciler
                        .reconcile(&priced.lines, &previous)
                        .await
                        .map(|_| ()),
                    Err(invalid) => Err(invalid),
                };
                if let Err(undo) = undo {
                    error!(order_id = %id, error = %undo, "Reverting stock failed");
                }
                Err(e)
            }
        }
    }

    /// Returns the stock held by an order and deletes it. Lines whose product no longer exists
    /// are reported as skipped; the order is deleted regardless.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<ReleaseReport, OrderError> {
        let order = self.load(id).await?;
        let report = self.reconciler.release(&order.lines).await?;
        if let Err(e) = self.reconciler.orders().delete_by_id(id).await {
            error!(order_id = %id, error = %e, "Deleting order failed, taking stock back");
            if let Ok(restored) = LineItems::new(report.restored.clone()) {
                if let Err(undo) = self.reconciler.apply(&restored).await {
                    error!(order_id = %id, error = %undo, "Taking stock back failed");
                }
            }
            return Err(e);
        }
        info!(order_id = %id, restored = report.restored.len(), skipped = report.skipped.len(), "Order deleted");
        Ok(report)
    }

    /// Sales total of the 07:00 to 22:00 business window on `day`.
    #[instrument(skip(self))]
    pub async fn daily_total(&self, day: NaiveDate) -> Result<f64, OrderError> {
        self.reconciler.total_for_window(day, Utc::now()).await
    }

    async fn load(&self, id: OrderId) -> Result<Order, OrderError> {
        self.reconciler
            .orders()
            .find_by_id(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }
}
