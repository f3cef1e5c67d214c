use actor_framework::{ActorClient, PageRequest};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use inventory::config::InventoryConfig;
use inventory::envelope::{Envelope, HttpStatus};
use inventory::lifecycle::InventorySystem;
use inventory::model::{
    LineRequest, OrderCreate, OrderLine, OrderRequest, ProductCreate, ProductId, ProductQuery,
    ProductUpdate,
};
use inventory::order_actor::OrderError;
use inventory::product_actor::ProductError;

fn request(lines: &[(u32, i64)]) -> OrderRequest {
    OrderRequest::new(
        lines
            .iter()
            .map(|&(id, quantity)| LineRequest::new(id, quantity))
            .collect(),
    )
}

async fn stock(system: &InventorySystem, id: u32) -> u32 {
    system
        .product_client
        .check_stock(ProductId(id))
        .await
        .expect("Failed to check stock")
}

/// Full end-to-end integration test with all real actors.
#[tokio::test]
async fn test_full_order_lifecycle() {
    let system = InventorySystem::new(&InventoryConfig::default());

    system
        .product_client
        .create_product(ProductCreate::new(ProductId(1), "Widget", 10, 2.5))
        .await
        .expect("Failed to create product");

    // Create: P (stock 10, price 2.5), 4 units
    let order = system
        .service
        .create_order(&request(&[(1, 4)]))
        .await
        .expect("Failed to create order");
    assert_eq!(order.lines, vec![OrderLine::new(ProductId(1), 4, 10.0)]);
    assert_eq!(order.total_amount, 10.0);
    assert_eq!(stock(&system, 1).await, 6);

    // Update 4 -> 6 after a price change: needs 2 more, repriced at 3.0
    system
        .product_client
        .update_product(
            ProductId(1),
            ProductUpdate {
                price: Some(3.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let updated = system
        .service
        .update_order(order.id, &request(&[(1, 6)]))
        .await
        .expect("Failed to update order");
    assert_eq!(updated.lines, vec![OrderLine::new(ProductId(1), 6, 18.0)]);
    assert_eq!(updated.total_amount, 18.0);
    assert_eq!(updated.created_at, order.created_at);
    assert_eq!(stock(&system, 1).await, 4);

    // Details carry the current product
    let details = system.service.get_order(order.id).await.unwrap();
    assert_eq!(details.items.len(), 1);
    assert_eq!(details.items[0].product.as_ref().unwrap().name, "Widget");

    // Delete gives everything back
    let report = system.service.delete_order(order.id).await.unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(stock(&system, 1).await, 10);
    assert!(system.order_client.get(order.id).await.unwrap().is_none());
    assert_eq!(
        system.service.get_order(order.id).await,
        Err(OrderError::NotFound(order.id.to_string()))
    );

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_product_management() {
    let system = InventorySystem::new(&InventoryConfig::default());
    let products = &system.product_client;

    for (id, name) in [(3, "Blue Widget"), (1, "Red Widget"), (2, "Gadget")] {
        products
            .create_product(ProductCreate::new(ProductId(id), name, 1, 1.0))
            .await
            .unwrap();
    }

    // Duplicate catalogue number
    let duplicate = products
        .create_product(ProductCreate::new(ProductId(1), "Other", 1, 1.0))
        .await;
    assert_eq!(duplicate, Err(ProductError::AlreadyExists("product_1".to_string())));
    assert_eq!(products.get_product(ProductId(1)).await.unwrap().name, "Red Widget");

    // Missing fields
    let invalid = products
        .create_product(ProductCreate::new(ProductId(9), "", 1, 1.0))
        .await;
    assert!(matches!(invalid, Err(ProductError::Validation(_))));

    // Search is case-insensitive, results in catalogue order
    let widgets = products
        .list_products(ProductQuery::search("WIDGET"), None)
        .await
        .unwrap();
    let ids: Vec<ProductId> = widgets.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![ProductId(1), ProductId(3)]);

    let by_id = products
        .list_products(ProductQuery::by_id(ProductId(2)), None)
        .await
        .unwrap();
    assert_eq!(by_id.total, 1);

    let second_page = products
        .list_products(ProductQuery::all(), Some(PageRequest::new(2, 2)))
        .await
        .unwrap();
    assert_eq!(second_page.items.len(), 1);
    assert_eq!(second_page.total, 3);
    assert_eq!(second_page.total_pages(), 2);

    let bad_page = products
        .list_products(ProductQuery::all(), Some(PageRequest::new(0, 5)))
        .await;
    assert!(matches!(bad_page, Err(ProductError::Validation(_))));

    products.delete_product(ProductId(2)).await.unwrap();
    assert_eq!(
        products.delete_product(ProductId(2)).await,
        Err(ProductError::NotFound("product_2".to_string()))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_multi_line_order_leaves_stock_unchanged() {
    let system = InventorySystem::new(&InventoryConfig::default());
    for (id, quantity) in [(1, 10), (2, 2)] {
        system
            .product_client
            .create_product(ProductCreate::new(ProductId(id), "Part", quantity, 1.0))
            .await
            .unwrap();
    }

    let result = system.service.create_order(&request(&[(1, 5), (2, 3)])).await;

    assert!(matches!(
        result,
        Err(OrderError::InsufficientStock {
            product_id: ProductId(2),
            ..
        })
    ));
    assert_eq!(stock(&system, 1).await, 10);
    assert_eq!(stock(&system, 2).await, 2);

    let orders = system.service.list_orders(None).await.unwrap();
    assert_eq!(orders.total, 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_orders_never_oversell() {
    let system = InventorySystem::new(&InventoryConfig::default());
    system
        .product_client
        .create_product(ProductCreate::new(ProductId(1), "Last units", 10, 1.0))
        .await
        .unwrap();

    let tasks: Vec<_> = (0..25)
        .map(|_| {
            let service = system.service.clone();
            tokio::spawn(async move { service.create_order(&request(&[(1, 1)])).await })
        })
        .collect();

    let mut placed = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => placed += 1,
            Err(e) => assert!(matches!(e, OrderError::InsufficientStock { .. }), "{e}"),
        }
    }

    assert_eq!(placed, 10);
    assert_eq!(stock(&system, 1).await, 0);
    let orders = system
        .service
        .list_orders(Some(PageRequest::new(1, 100)))
        .await
        .unwrap();
    assert_eq!(orders.total, 10);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_deleting_order_after_product_removal() {
    let system = InventorySystem::new(&InventoryConfig::default());
    for id in [1, 2] {
        system
            .product_client
            .create_product(ProductCreate::new(ProductId(id), "Part", 5, 1.0))
            .await
            .unwrap();
    }
    let order = system
        .service
        .create_order(&request(&[(1, 2), (2, 2)]))
        .await
        .unwrap();

    system.product_client.delete_product(ProductId(2)).await.unwrap();

    let details = system.service.get_order(order.id).await.unwrap();
    assert!(details.items[1].product.is_none());

    let report = system.service.delete_order(order.id).await.unwrap();
    assert_eq!(report.skipped, vec![ProductId(2)]);
    assert_eq!(stock(&system, 1).await, 5);
    assert!(system.order_client.get(order.id).await.unwrap().is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_validation_and_pagination() {
    let system = InventorySystem::new(&InventoryConfig {
        page_limit: 2,
        ..InventoryConfig::default()
    });
    system
        .product_client
        .create_product(ProductCreate::new(ProductId(1), "Widget", 100, 1.0))
        .await
        .unwrap();

    let empty = OrderRequest::from_json(r#"{"items": []}"#).unwrap();
    let err = system.service.create_order(&empty).await.unwrap_err();
    assert_eq!(err.status_code(), 400);

    let unknown = system.service.create_order(&request(&[(42, 1)])).await;
    assert_eq!(unknown, Err(OrderError::ProductNotFound(ProductId(42))));

    for _ in 0..5 {
        system.service.create_order(&request(&[(1, 1)])).await.unwrap();
    }

    let first = system.service.list_orders(None).await.unwrap();
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.total, 5);
    assert_eq!(first.total_pages(), 3);

    let last = system
        .service
        .list_orders(Some(PageRequest::new(3, 2)))
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);

    let invalid = system.service.list_orders(Some(PageRequest::new(1, 0))).await;
    assert!(matches!(invalid, Err(OrderError::Validation(_))));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_daily_total() {
    let system = InventorySystem::new(&InventoryConfig::default());
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    for (hour, total) in [(6, 1.0), (8, 10.0), (21, 2.5), (22, 100.0)] {
        system
            .order_client
            .create_order(OrderCreate {
                lines: vec![OrderLine::new(ProductId(1), 1, total)],
                total_amount: total,
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            })
            .await
            .unwrap();
    }

    assert_eq!(system.service.daily_total(day).await, Ok(12.5));

    let quiet_day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    assert_eq!(system.service.daily_total(quiet_day).await, Ok(0.0));

    let future = (Utc::now() + Duration::days(2)).date_naive();
    let err = system.service.daily_total(future).await;
    assert_eq!(err, Err(OrderError::FutureDate(future)));

    let (status, envelope) = Envelope::<f64>::from_result(err);
    assert_eq!(status, 400);
    assert!(!envelope.is_success());

    system.shutdown().await.unwrap();
}
