//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes domain‑specific methods.
use crate::config::DEFAULT_PAGE_LIMIT;
use crate::model::{Product, ProductCreate, ProductId, ProductQuery, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use crate::reconciler::ProductStore;
use actor_framework::{ActorClient, FrameworkError, Listing, PageRequest, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    page_limit: u32,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self {
            inner,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Page size used when `list_products` is called without a page.
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from_framework(e)
    }
}

impl ProductClient {
    /// Registers a product under its catalogue number.
    ///
    /// Fails with `AlreadyExists` if the number is taken and `Validation` if the name is empty
    /// or the price is not a non-negative number.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner
            .create(params)
            .await
            .map_err(ProductError::from_framework)
    }

    /// Like `get`, but a missing product is an error.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(ProductError::from_framework)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        self.delete(id).await
    }

    /// Lists products matching `query`, one page at a time.
    ///
    /// Without an explicit page the first page of the configured size is returned. A page or
    /// limit below 1 is a `Validation` error.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: ProductQuery,
        page: Option<PageRequest>,
    ) -> Result<Listing<Product>, ProductError> {
        let page = page.unwrap_or(PageRequest::new(1, self.page_limit));
        self.list(query, Some(page)).await
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock");
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(ProductError::from_framework)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Adds `delta` to the stock of a product and returns the new level.
    ///
    /// The check and the write happen in one actor turn: a decrement larger than the stock
    /// fails with `InsufficientStock` and leaves the stock untouched.
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: ProductId, delta: i64) -> Result<u32, ProductError> {
        debug!("Adjusting stock");
        match self
            .inner
            .perform_action(id, ProductAction::AdjustStock(delta))
            .await
            .map_err(ProductError::from_framework)?
        {
            ProductActionResult::AdjustStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[async_trait]
impl ProductStore for ProductClient {
    async fn find_by_business_id(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        self.get(id).await
    }

    async fn adjust_quantity(&self, id: ProductId, delta: i64) -> Result<u32, ProductError> {
        self.adjust_stock(id, delta).await
    }
}
