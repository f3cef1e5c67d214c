//! # Inventory Reconciler
//!
//! Keeps product stock consistent with the orders placed against it.
//!
//! | Operation | When | Stock effect |
//! |---|---|---|
//! | [`apply`](InventoryReconciler::apply) | order created | decrement every line |
//! | [`reconcile`](InventoryReconciler::reconcile) | order updated | net difference old → new |
//! | [`release`](InventoryReconciler::release) | order deleted | restore every line |
//! | [`total_for_window`](InventoryReconciler::total_for_window) | reporting | none |
//!
//! ## Atomicity
//!
//! Every stock write is a single [`ProductStore::adjust_quantity`] call, which the product
//! actor checks and applies in one turn, so a product is never driven below zero even by
//! concurrent orders. Operations spanning several products are made all-or-nothing by
//! compensation: when a later write fails, the writes already made by the same call are
//! reverted (newest first) before the error is returned. A compensation that fails itself is
//! logged at `error` level and the original error is still returned.

mod store;

pub use store::{OrderStore, ProductStore};

use crate::model::{validate_price, LineItems, OrderLine, Product, ProductId, RequestedLine};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error, info, instrument, warn};

/// Start of the daily sales window, business-local hour (inclusive).
pub const WINDOW_OPENS_AT: u32 = 7;
/// End of the daily sales window, business-local hour (exclusive).
pub const WINDOW_CLOSES_AT: u32 = 22;

/// Lines priced at the current product prices, plus their sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedLines {
    pub lines: Vec<OrderLine>,
    pub total_amount: f64,
}

impl PricedLines {
    fn new(lines: Vec<OrderLine>) -> Self {
        let total_amount = crate::model::sum_line_totals(&lines);
        Self {
            lines,
            total_amount,
        }
    }
}

/// Outcome of [`InventoryReconciler::release`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReleaseReport {
    /// Lines whose stock was put back.
    pub restored: Vec<RequestedLine>,
    /// Products that no longer exist; their stock could not be restored.
    pub skipped: Vec<ProductId>,
}

/// Stock writes made so far by one operation, for compensation.
#[derive(Debug, Default)]
struct Journal(Vec<(ProductId, i64)>);

#[derive(Clone)]
pub struct InventoryReconciler<P, O> {
    products: P,
    orders: O,
    utc_offset: FixedOffset,
}

impl<P: ProductStore, O: OrderStore> InventoryReconciler<P, O> {
    /// `utc_offset` is the business time zone used by [`total_for_window`](Self::total_for_window).
    pub fn new(products: P, orders: O, utc_offset: FixedOffset) -> Self {
        Self {
            products,
            orders,
            utc_offset,
        }
    }

    /// Reconciler whose business day is the UTC day.
    pub fn with_utc(products: P, orders: O) -> Self {
        Self::new(products, orders, Utc.fix())
    }

    pub fn products(&self) -> &P {
        &self.products
    }

    pub fn orders(&self) -> &O {
        &self.orders
    }

    /// Takes stock for a new order and prices its lines.
    ///
    /// Lines are processed in request order. For each: the product must exist, have at least
    /// the requested quantity on hand, and carry a usable price; then its stock is decremented.
    /// The first failing line aborts the call and every decrement made before it is restored.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn apply(&self, lines: &LineItems) -> Result<PricedLines, OrderError> {
        let mut journal = Journal::default();
        let mut priced = Vec::with_capacity(lines.len());

        for line in lines {
            match self.take_line(line, &mut journal).await {
                Ok(order_line) => priced.push(order_line),
                Err(e) => {
                    warn!(product_id = %line.product_id, error = %e, "Order line rejected");
                    self.compensate(journal).await;
                    return Err(e);
                }
            }
        }

        let priced = PricedLines::new(priced);
        info!(total_amount = priced.total_amount, "Stock applied");
        Ok(priced)
    }

    async fn take_line(
        &self,
        line: &RequestedLine,
        journal: &mut Journal,
    ) -> Result<OrderLine, OrderError> {
        let product = self.find(line.product_id).await?;
        if line.quantity > product.quantity {
            return Err(OrderError::InsufficientStock {
                product_id: line.product_id,
                requested: line.quantity,
                available: product.quantity,
            });
        }
        let total = price_line(&product, line.quantity)?;
        self.adjust(line.product_id, -i64::from(line.quantity), journal)
            .await?;
        Ok(OrderLine::new(line.product_id, line.quantity, total))
    }

    /// Moves stock from an order's current lines to its new lines and reprices them.
    ///
    /// Per product: removed lines give their quantity back, changed lines need
    /// `on_hand + old >= new` and move by `old - new`, added lines need `new <= on_hand` and
    /// take `new`. Unchanged lines cause no write. Every touched product is read once up front
    /// and the whole plan is checked against that read before anything is written. Decrements
    /// are written before restores, so a write that still fails (another order got there
    /// first) only has decrements to revert, and released units never reach another buyer.
    ///
    /// The returned lines follow the order of `new_lines`, each priced at the product's
    /// current price.
    #[instrument(skip(self, old_lines, new_lines), fields(old = old_lines.len(), new = new_lines.len()))]
    pub async fn reconcile(
        &self,
        old_lines: &[OrderLine],
        new_lines: &LineItems,
    ) -> Result<PricedLines, OrderError> {
        let mut old: BTreeMap<ProductId, u32> = BTreeMap::new();
        for line in old_lines {
            *old.entry(line.product_id).or_default() += line.quantity;
        }
        let new: BTreeMap<ProductId, u32> = new_lines
            .iter()
            .map(|line| (line.product_id, line.quantity))
            .collect();

        let mut snapshot: HashMap<ProductId, Option<Product>> = HashMap::new();
        for id in old.keys().chain(new.keys()) {
            if !snapshot.contains_key(id) {
                let product = self
                    .products
                    .find_by_business_id(*id)
                    .await
                    .map_err(|e| OrderError::from_product(*id, e))?;
                snapshot.insert(*id, product);
            }
        }

        // Validate the whole plan before the first write.
        let mut plan: Vec<(ProductId, i64)> = Vec::new();
        for (id, &old_qty) in &old {
            if new.contains_key(id) {
                continue;
            }
            if snapshot.get(id).is_some_and(Option::is_some) {
                plan.push((*id, i64::from(old_qty)));
            } else {
                warn!(product_id = %id, quantity = old_qty, "Removed line refers to a deleted product, nothing to restore");
            }
        }

        let mut priced = Vec::with_capacity(new_lines.len());
        for line in new_lines {
            let id = line.product_id;
            let product = snapshot
                .get(&id)
                .and_then(Option::as_ref)
                .ok_or(OrderError::ProductNotFound(id))?;
            let old_qty = old.get(&id).copied().unwrap_or(0);

            if line.quantity != old_qty {
                let available = product.quantity.saturating_add(old_qty);
                if line.quantity > available {
                    return Err(OrderError::InsufficientStock {
                        product_id: id,
                        requested: line.quantity,
                        available,
                    });
                }
                plan.push((id, i64::from(old_qty) - i64::from(line.quantity)));
            }

            let total = price_line(product, line.quantity)?;
            priced.push(OrderLine::new(id, line.quantity, total));
        }

        // Takes first: undoing a take is a restore and cannot run out of stock.
        plan.sort_by_key(|&(_, delta)| delta > 0);

        let writes = plan.len();
        let mut journal = Journal::default();
        for (id, delta) in plan {
            if let Err(e) = self.adjust(id, delta, &mut journal).await {
                warn!(product_id = %id, delta, error = %e, "Stock adjustment failed, rolling back");
                self.compensate(journal).await;
                return Err(e);
            }
        }

        let priced = PricedLines::new(priced);
        info!(
            writes,
            total_amount = priced.total_amount,
            "Order lines reconciled"
        );
        Ok(priced)
    }

    /// Puts back the stock held by an order's lines.
    ///
    /// A product that has been deleted since the order was placed is skipped and reported.
    /// Any other failure reverts the restores already made and is returned.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn release(&self, lines: &[OrderLine]) -> Result<ReleaseReport, OrderError> {
        let mut journal = Journal::default();
        let mut report = ReleaseReport::default();

        for line in lines {
            let delta = i64::from(line.quantity);
            match self.products.adjust_quantity(line.product_id, delta).await {
                Ok(level) => {
                    debug!(product_id = %line.product_id, delta, level, "Stock restored");
                    journal.0.push((line.product_id, delta));
                    report.restored.push(RequestedLine::from(line));
                }
                Err(ProductError::NotFound(_)) => {
                    warn!(product_id = %line.product_id, quantity = line.quantity, "Product no longer exists, skipping restore");
                    report.skipped.push(line.product_id);
                }
                Err(e) => {
                    let e = OrderError::from_product(line.product_id, e);
                    warn!(product_id = %line.product_id, error = %e, "Restore failed, rolling back");
                    self.compensate(journal).await;
                    return Err(e);
                }
            }
        }

        Ok(report)
    }

    /// Sum of order totals created between 07:00 (inclusive) and 22:00 (exclusive),
    /// business-local time, on `day`.
    ///
    /// Fails with `FutureDate` if `day` has not started yet at `now`.
    #[instrument(skip(self))]
    pub async fn total_for_window(
        &self,
        day: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<f64, OrderError> {
        if self.local_instant(day, 0)? > now {
            return Err(OrderError::FutureDate(day));
        }
        let start = self.local_instant(day, WINDOW_OPENS_AT)?;
        let end = self.local_instant(day, WINDOW_CLOSES_AT)?;
        self.orders.sum_totals_in_window(start, end).await
    }

    fn local_instant(&self, day: NaiveDate, hour: u32) -> Result<DateTime<Utc>, OrderError> {
        day.and_hms_opt(hour, 0, 0)
            .and_then(|local| local.and_local_timezone(self.utc_offset).single())
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| OrderError::Validation(format!("{day} {hour:02}:00 is out of range")))
    }

    async fn find(&self, id: ProductId) -> Result<Product, OrderError> {
        self.products
            .find_by_business_id(id)
            .await
            .map_err(|e| OrderError::from_product(id, e))?
            .ok_or(OrderError::ProductNotFound(id))
    }

    async fn adjust(
        &self,
        id: ProductId,
        delta: i64,
        journal: &mut Journal,
    ) -> Result<u32, OrderError> {
        let level = self
            .products
            .adjust_quantity(id, delta)
            .await
            .map_err(|e| OrderError::from_product(id, e))?;
        debug!(product_id = %id, delta, level, "Stock adjusted");
        journal.0.push((id, delta));
        Ok(level)
    }

    /// Reverts journaled writes, newest first.
    async fn compensate(&self, journal: Journal) {
        for (id, delta) in journal.0.into_iter().rev() {
            match self.products.adjust_quantity(id, -delta).await {
                Ok(level) => warn!(product_id = %id, delta = -delta, level, "Compensated stock adjustment"),
                Err(e) => error!(product_id = %id, delta = -delta, error = %e, "Compensation failed, stock is inconsistent"),
            }
        }
    }
}

fn price_line(product: &Product, quantity: u32) -> Result<f64, OrderError> {
    validate_price(product.price).map_err(|_| OrderError::InvalidPrice {
        product_id: product.id,
        price: product.price,
    })?;
    Ok(product.line_total(quantity))
}
