//! Raw order requests and the validated line items built from them.
//!
//! [`OrderRequest`] mirrors the JSON clients send:
//!
//! ```text
//! {"items": [{"ID": 7, "quantity": 4}, {"ID": 9, "quantity": 1}]}
//! ```
//!
//! Every field is optional at this stage so that malformed input produces a
//! [`OrderError::Validation`] naming the offending item rather than a decoding error.
//! [`OrderRequest::validate`] runs once at the boundary and yields [`LineItems`], which the
//! reconciler accepts as already valid.

use crate::model::{OrderLine, ProductId};
use crate::order_actor::OrderError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineRequest {
    #[serde(rename = "ID")]
    pub product_id: Option<u32>,
    pub quantity: Option<i64>,
}

impl LineRequest {
    pub fn new(product_id: u32, quantity: i64) -> Self {
        Self {
            product_id: Some(product_id),
            quantity: Some(quantity),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub items: Option<Vec<LineRequest>>,
}

impl OrderRequest {
    pub fn new(items: Vec<LineRequest>) -> Self {
        Self { items: Some(items) }
    }

    /// Decodes a request body. Syntax errors are reported as validation errors.
    pub fn from_json(body: &str) -> Result<Self, OrderError> {
        serde_json::from_str(body)
            .map_err(|e| OrderError::Validation(format!("malformed order request: {e}")))
    }

    /// Checks the request and produces the line items the reconciler works on.
    pub fn validate(&self) -> Result<LineItems, OrderError> {
        let items = match &self.items {
            Some(items) if !items.is_empty() => items,
            _ => return Err(invalid("items must be a non-empty list")),
        };

        let lines = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let product_id = item
                    .product_id
                    .ok_or_else(|| invalid(format!("items[{index}].ID is required")))?;
                let quantity = item
                    .quantity
                    .ok_or_else(|| invalid(format!("items[{index}].quantity is required")))?;
                let quantity = u32::try_from(quantity)
                    .ok()
                    .filter(|q| *q > 0)
                    .ok_or_else(|| {
                        invalid(format!(
                            "items[{index}].quantity must be a positive integer, got {quantity}"
                        ))
                    })?;
                Ok(RequestedLine::new(ProductId(product_id), quantity))
            })
            .collect::<Result<Vec<_>, OrderError>>()?;

        LineItems::new(lines)
    }
}

fn invalid(message: impl Into<String>) -> OrderError {
    OrderError::Validation(message.into())
}

/// A validated `(product, quantity > 0)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestedLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl RequestedLine {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

impl From<&OrderLine> for RequestedLine {
    fn from(line: &OrderLine) -> Self {
        Self::new(line.product_id, line.quantity)
    }
}

/// Non-empty list of requested lines with unique products, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItems(Vec<RequestedLine>);

impl LineItems {
    pub fn new(lines: Vec<RequestedLine>) -> Result<Self, OrderError> {
        if lines.is_empty() {
            return Err(invalid("items must be a non-empty list"));
        }
        let mut seen = HashSet::new();
        for (index, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(invalid(format!("items[{index}].quantity must be positive")));
            }
            if !seen.insert(line.product_id) {
                return Err(invalid(format!(
                    "items[{index}].ID {} appears more than once",
                    line.product_id.0
                )));
            }
        }
        Ok(Self(lines))
    }

    /// The requested lines of a stored order.
    pub fn from_order_lines(lines: &[OrderLine]) -> Result<Self, OrderError> {
        Self::new(lines.iter().map(RequestedLine::from).collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RequestedLine> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a LineItems {
    type Item = &'a RequestedLine;
    type IntoIter = std::slice::Iter<'a, RequestedLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
