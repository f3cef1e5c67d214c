use actor_framework::mock::MockClient;
use actor_framework::FrameworkError;
use chrono::Utc;
use inventory::clients::{OrderClient, ProductClient};
use inventory::model::{
    LineRequest, Order, OrderId, OrderLine, OrderRequest, ProductCreate, ProductId,
};
use inventory::order_actor::OrderError;
use inventory::reconciler::InventoryReconciler;
use inventory::service::OrderService;
use tokio::task::JoinHandle;

/// Pattern 2 again, the other way round:
/// - Real Product actor (stock really moves and is really given back)
/// - Mocked Order client (the order store fails on the write under test)
async fn setup(
    stock: u32,
    order_mock: &MockClient<Order>,
) -> (OrderService, ProductClient, JoinHandle<()>) {
    let (product_actor, product_generic) = inventory::product_actor::new(10);
    let product_client = ProductClient::new(product_generic);
    let handle = tokio::spawn(product_actor.run(()));

    product_client
        .create_product(ProductCreate::new(ProductId(1), "Widget", stock, 2.5))
        .await
        .expect("Failed to create product");

    let reconciler = InventoryReconciler::with_utc(
        product_client.clone(),
        OrderClient::new(order_mock.client()),
    );
    (OrderService::new(reconciler), product_client, handle)
}

fn request(quantity: i64) -> OrderRequest {
    OrderRequest::new(vec![LineRequest::new(1, quantity)])
}

fn stored_order(quantity: u32) -> Order {
    Order::new(
        OrderId(1),
        vec![OrderLine::new(ProductId(1), quantity, 2.5 * f64::from(quantity))],
        Utc::now(),
    )
}

async fn finish(service: OrderService, product_client: ProductClient, handle: JoinHandle<()>) {
    drop(service);
    drop(product_client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_create_returns_stock_when_order_cannot_be_stored() {
    let mut order_mock = MockClient::<Order>::new();
    order_mock
        .expect_create()
        .return_err(FrameworkError::ActorClosed);
    let (service, products, handle) = setup(10, &order_mock).await;

    let result = service.create_order(&request(4)).await;

    assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    assert_eq!(products.check_stock(ProductId(1)).await.unwrap(), 10);
    order_mock.verify();
    finish(service, products, handle).await;
}

#[tokio::test]
async fn test_update_reverts_stock_when_order_cannot_be_stored() {
    let mut order_mock = MockClient::<Order>::new();
    order_mock
        .expect_get(OrderId(1))
        .return_ok(Some(stored_order(4)));
    order_mock
        .expect_update(OrderId(1))
        .return_err(FrameworkError::ActorClosed);
    // 10 in the catalogue, 4 held by the stored order.
    let (service, products, handle) = setup(6, &order_mock).await;

    let result = service.update_order(OrderId(1), &request(6)).await;

    assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    assert_eq!(products.check_stock(ProductId(1)).await.unwrap(), 6);
    order_mock.verify();
    finish(service, products, handle).await;
}

#[tokio::test]
async fn test_delete_takes_stock_back_when_order_cannot_be_deleted() {
    let mut order_mock = MockClient::<Order>::new();
    order_mock
        .expect_get(OrderId(1))
        .return_ok(Some(stored_order(4)));
    order_mock
        .expect_delete(OrderId(1))
        .return_err(FrameworkError::ActorClosed);
    let (service, products, handle) = setup(6, &order_mock).await;

    let result = service.delete_order(OrderId(1)).await;

    assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    // The order still exists, so it still holds its 4 units.
    assert_eq!(products.check_stock(ProductId(1)).await.unwrap(), 6);
    order_mock.verify();
    finish(service, products, handle).await;
}
