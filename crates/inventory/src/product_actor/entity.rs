//! [`ActorEntity`] implementation for [`Product`].
//!
//! Products keep the catalogue number the caller registered them under
//! ([`ActorEntity::requested_id`]), so a second registration of the same number is rejected by
//! the actor before any hook runs.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{
    validate_name, validate_price, Product, ProductCreate, ProductId, ProductQuery, ProductUpdate,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Query = ProductQuery;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn requested_id(params: &ProductCreate) -> Option<ProductId> {
        Some(params.id)
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        params.validate().map_err(ProductError::Validation)?;
        Ok(Self::new(id, params.name, params.quantity, params.price))
    }

    fn matches(&self, query: &ProductQuery) -> bool {
        query.accepts(self)
    }

    /// Applies the fields present in the update, validating each one.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        if let Some(name) = update.name {
            validate_name(&name).map_err(ProductError::Validation)?;
            self.name = name;
        }
        if let Some(price) = update.price {
            validate_price(price).map_err(ProductError::Validation)?;
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.quantity)),
            ProductAction::AdjustStock(delta) => {
                let adjusted = i64::from(self.quantity) + delta;
                if adjusted < 0 {
                    return Err(ProductError::InsufficientStock {
                        requested: u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX),
                        available: self.quantity,
                    });
                }
                self.quantity = u32::try_from(adjusted).map_err(|_| {
                    ProductError::Validation(format!(
                        "stock of {} would exceed {}",
                        self.id,
                        u32::MAX
                    ))
                })?;
                Ok(ProductActionResult::AdjustStock(self.quantity))
            }
        }
    }
}
