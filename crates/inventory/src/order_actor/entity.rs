//! [`ActorEntity`] implementation for [`Order`].
//!
//! The order store only persists orders that are already reconciled: stock has been adjusted
//! and every line priced before `Create` or `Update` reaches it. The hooks check the stored
//! shape (non-empty lines, total equal to the sum of line totals) and nothing more.

use super::error::OrderError;
use crate::model::{validate_lines, Order, OrderCreate, OrderId, OrderQuery, OrderUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

/// Orders have no custom actions.
#[derive(Debug, Clone)]
pub enum OrderAction {}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Query = OrderQuery;
    type Action = OrderAction;
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        validate_lines(&params.lines, params.total_amount).map_err(OrderError::Validation)?;
        Ok(Self {
            id,
            lines: params.lines,
            total_amount: params.total_amount,
            created_at: params.created_at,
        })
    }

    fn matches(&self, query: &OrderQuery) -> bool {
        query.accepts(self)
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), OrderError> {
        validate_lines(&update.lines, update.total_amount).map_err(OrderError::Validation)?;
        self.lines = update.lines;
        self.total_amount = update.total_amount;
        Ok(())
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<(), OrderError> {
        match action {}
    }
}
