/// Represents a product in the inventory.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`](crate::model::ProductCreate))
/// - Update parameters ([`ProductUpdate`](crate::model::ProductUpdate))
/// - List filters ([`ProductQuery`](crate::model::ProductQuery))
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Caller-assigned catalogue number of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: ProductId,
    pub name: String,
    /// Quantity on hand.
    pub quantity: u32,
    pub price: f64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Catalogue number chosen by the caller
    /// * `name` - Product name
    /// * `quantity` - Quantity on hand
    /// * `price` - Unit price
    pub fn new(id: ProductId, name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Price of `quantity` units at the current unit price.
    pub fn line_total(&self, quantity: u32) -> f64 {
        f64::from(quantity) * self.price
    }
}

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name is required".to_string());
    }
    Ok(())
}

/// A price must be a finite, non-negative number.
pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price < 0.0 {
        return Err(format!("price must be a non-negative number, got {price}"));
    }
    Ok(())
}

/// Payload for registering a product under its catalogue number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    #[serde(rename = "ID")]
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

impl ProductCreate {
    pub fn new(id: ProductId, name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            price,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_price(self.price)
    }
}

/// Partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
}

/// Filter for product listings. An empty query selects every product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Exact catalogue number.
    #[serde(rename = "ID")]
    pub id: Option<ProductId>,
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
}

impl ProductQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: ProductId) -> Self {
        Self {
            id: Some(id),
            search: None,
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            id: None,
            search: Some(term.into()),
        }
    }

    pub fn accepts(&self, product: &Product) -> bool {
        let id_ok = self.id.is_none_or(|id| product.id == id);
        let name_ok = self.search.as_ref().is_none_or(|term| {
            product
                .name
                .to_lowercase()
                .contains(&term.to_lowercase())
        });
        id_ok && name_ok
    }
}
