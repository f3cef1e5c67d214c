//! # Inventory demo
//!
//! Walks through the product and order lifecycle against a fresh [`InventorySystem`] and logs
//! every result as the JSON envelope an HTTP layer would send.
//!
//! ```bash
//! RUST_LOG=info cargo run -p inventory
//! ```

use actor_framework::tracing::setup_tracing;
use chrono::Utc;
use inventory::config::InventoryConfig;
use inventory::envelope::Envelope;
use inventory::lifecycle::InventorySystem;
use inventory::model::{OrderRequest, ProductCreate, ProductId, ProductQuery};
use serde::Serialize;
use tracing::{info, Instrument};

fn respond<T: Serialize>(step: &str, (status, envelope): (u16, Envelope<T>)) {
    match envelope.to_json() {
        Ok(body) => info!(step, status, %body, "Response"),
        Err(e) => info!(step, status, error = %e, "Response could not be rendered"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = InventoryConfig::from_env()?;
    let system = InventorySystem::new(&config);

    async {
        for params in [
            ProductCreate::new(ProductId(1), "Widget", 10, 2.5),
            ProductCreate::new(ProductId(2), "Gadget", 3, 12.0),
            ProductCreate::new(ProductId(1), "Widget again", 1, 1.0),
        ] {
            respond(
                "create_product",
                Envelope::created(system.product_client.create_product(params).await),
            );
        }
        respond(
            "list_products",
            Envelope::from_result(
                system
                    .product_client
                    .list_products(ProductQuery::search("widget"), None)
                    .await,
            ),
        );
    }
    .instrument(tracing::info_span!("catalogue"))
    .await;

    let order_id = async {
        let request = OrderRequest::from_json(
            r#"{"items": [{"ID": 1, "quantity": 4}, {"ID": 2, "quantity": 1}]}"#,
        )?;
        let order = system.service.create_order(&request).await;
        let order_id = order.as_ref().ok().map(|order| order.id);
        respond("create_order", Envelope::created(order));

        let too_many = OrderRequest::from_json(r#"{"items": [{"ID": 2, "quantity": 5}]}"#)?;
        respond(
            "create_order",
            Envelope::created(system.service.create_order(&too_many).await),
        );

        Ok::<_, Box<dyn std::error::Error>>(order_id)
    }
    .instrument(tracing::info_span!("order_processing"))
    .await?;

    if let Some(id) = order_id {
        let span = tracing::info_span!("order_changes", order_id = %id);
        async {
            let request = OrderRequest::from_json(r#"{"items": [{"ID": 1, "quantity": 6}]}"#)?;
            respond(
                "update_order",
                Envelope::from_result(system.service.update_order(id, &request).await),
            );
            respond("get_order", Envelope::from_result(system.service.get_order(id).await));
            respond(
                "daily_total",
                Envelope::from_result(system.service.daily_total(Utc::now().date_naive()).await),
            );
            respond("delete_order", Envelope::deleted(system.service.delete_order(id).await));
            Ok::<_, Box<dyn std::error::Error>>(())
        }
        .instrument(span)
        .await?;
    }

    respond(
        "check_stock",
        Envelope::from_result(system.product_client.check_stock(ProductId(1)).await),
    );

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
