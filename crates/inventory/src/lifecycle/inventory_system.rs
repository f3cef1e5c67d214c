use crate::clients::{OrderClient, ProductClient};
use crate::config::InventoryConfig;
use crate::reconciler::InventoryReconciler;
use crate::service::OrderService;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// The runtime orchestrator for the inventory system.
///
/// Owns the product and order actors, and hands out their clients and the
/// [`OrderService`] built on them.
///
/// # Example
///
/// ```ignore
/// let system = InventorySystem::new(&InventoryConfig::default());
///
/// let id = system.product_client.create_product(params).await?;
/// let order = system.service.create_order(&request).await?;
///
/// system.shutdown().await?;
/// ```
pub struct InventorySystem {
    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    /// Order lifecycle on top of both stores
    pub service: OrderService,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl InventorySystem {
    /// Creates both actors, wires the service and spawns each actor in its own task.
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &InventoryConfig) -> Self {
        // 1. Create actors (no dependencies)
        let (product_actor, product_generic) = crate::product_actor::new(config.actor_buffer);
        let (order_actor, order_generic) = crate::order_actor::new(config.actor_buffer);

        let product_client = ProductClient::new(product_generic).with_page_limit(config.page_limit);
        let order_client = OrderClient::new(order_generic);

        // 2. Wire the service
        let reconciler = InventoryReconciler::new(
            product_client.clone(),
            order_client.clone(),
            config.utc_offset,
        );
        let service = OrderService::new(reconciler).with_page_limit(config.page_limit);

        // 3. Start actors; neither has dependencies (Context = ())
        let product_handle = tokio::spawn(product_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));

        info!(buffer = config.actor_buffer, "Inventory system started");
        Self {
            product_client,
            order_client,
            service,
            handles: vec![product_handle, order_handle],
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops every client held by the system, which closes the actor channels, then waits for
    /// all actor tasks. Fails if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        let Self {
            product_client,
            order_client,
            service,
            handles,
        } = self;

        // Senders gone: each actor's receiver returns None and its loop ends.
        drop(service);
        drop(order_client);
        drop(product_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
