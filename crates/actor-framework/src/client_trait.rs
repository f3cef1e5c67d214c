//! # ActorClient Trait
//!
//! Common surface for resource-specific clients: default `get`, `delete` and `list` built on
//! the inner `ResourceClient`, with framework errors mapped into the resource's own error type.
use crate::{ActorEntity, FrameworkError, Listing, PageRequest, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Product> for ProductClient {
///     type Error = ProductError;
///
///     fn inner(&self) -> &ResourceClient<Product> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         ProductError::from_framework(e)
///     }
/// }
///
/// // get(), delete() and list() are now available on ProductClient.
/// let widget = product_client.get(ProductId(7)).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// List entities matching `query`, optionally one page at a time.
    #[tracing::instrument(skip(self))]
    async fn list(
        &self,
        query: T::Query,
        page: Option<PageRequest>,
    ) -> Result<Listing<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(query, page).await.map_err(Self::map_error)
    }
}
