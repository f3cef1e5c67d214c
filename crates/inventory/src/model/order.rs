/// Represents a customer order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Update parameters ([`OrderUpdate`])
/// - List filters ([`OrderQuery`])
use crate::model::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// One priced line of an order. `total` is the price snapshot taken when the line was
/// last reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "ID")]
    pub product_id: ProductId,
    pub quantity: u32,
    pub total: f64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: u32, total: f64) -> Self {
        Self {
            product_id,
            quantity,
            total,
        }
    }
}

/// Sum of line totals, in line order.
pub fn sum_line_totals(lines: &[OrderLine]) -> f64 {
    lines.iter().map(|line| line.total).sum()
}

// Line totals are summed in the same order everywhere, so this only absorbs
// values that went through a serialization round trip.
const TOTAL_TOLERANCE: f64 = 1e-6;

/// Checks the shape every stored order must have: at least one line, positive quantities,
/// and a total equal to the sum of its line totals.
pub fn validate_lines(lines: &[OrderLine], total_amount: f64) -> Result<(), String> {
    if lines.is_empty() {
        return Err("an order needs at least one line".to_string());
    }
    if let Some(line) = lines.iter().find(|line| line.quantity == 0) {
        return Err(format!("quantity for {} must be positive", line.product_id));
    }
    let expected = sum_line_totals(lines);
    if (expected - total_amount).abs() > TOTAL_TOLERANCE {
        return Err(format!(
            "total_amount {total_amount} does not match line totals {expected}"
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "items")]
    pub lines: Vec<OrderLine>,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new Order instance with `total_amount` derived from the lines.
    pub fn new(id: OrderId, lines: Vec<OrderLine>, created_at: DateTime<Utc>) -> Self {
        let total_amount = sum_line_totals(&lines);
        Self {
            id,
            lines,
            total_amount,
            created_at,
        }
    }
}

/// Payload for persisting a reconciled order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub lines: Vec<OrderLine>,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

/// Replacement lines for an existing order. The creation time is kept.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub lines: Vec<OrderLine>,
    pub total_amount: f64,
}

/// Filter for order listings.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    /// Half-open creation window `[start, end)`.
    pub created_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl OrderQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn created_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            created_between: Some((start, end)),
        }
    }

    pub fn accepts(&self, order: &Order) -> bool {
        self.created_between
            .is_none_or(|(start, end)| start <= order.created_at && order.created_at < end)
    }
}
