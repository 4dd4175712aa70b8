//! Order service tests, including the transactional create, update and
//! delete paths run against mocked transaction-bound repositories.

mod common;

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use tienda_api::domain::{
    CreateOrder, Order, OrderId, OrderLine, OrderLineRequest, Product, UpdateOrder,
};
use tienda_api::errors::AppError;
use tienda_api::infra::{
    MockClientRepository, MockOrderRepository, MockTxOrderRepository, MockTxProductRepository,
};
use tienda_api::services::{OrderManager, OrderService};
use tienda_api::types::PaginationParams;

use common::{client, product, TestUnitOfWork};

fn price() -> Decimal {
    product(Uuid::nil(), "").price
}

fn order(id: &OrderId) -> Order {
    let mut order = Order::new(
        client(1),
        vec![OrderLine::new(Uuid::new_v4(), 2, Decimal::new(1599, 2)).unwrap()],
    )
    .unwrap();
    order.id = id.clone();
    order
}

fn order_with(id: &OrderId, lines: &[(Uuid, i32)]) -> Order {
    let lines = lines
        .iter()
        .map(|&(id_product, quantity)| OrderLine::new(id_product, quantity, price()).unwrap())
        .collect();
    let mut order = Order::new(client(1), lines).unwrap();
    order.id = id.clone();
    order
}

fn catalog(stock: &[(Uuid, i32)]) -> HashMap<Uuid, Product> {
    stock
        .iter()
        .map(|&(id, stock)| {
            let mut p = product(id, "");
            p.stock = stock;
            (id, p)
        })
        .collect()
}

fn line_request(id_product: Uuid, quantity: i32) -> OrderLineRequest {
    OrderLineRequest {
        id_product,
        quantity,
        price: price(),
    }
}

fn known_clients() -> MockClientRepository {
    let mut clients = MockClientRepository::new();
    clients
        .expect_find_by_id()
        .returning(|id| Ok(Some(client(id))));
    clients
}

#[tokio::test]
async fn test_find_by_id_returns_snapshot() {
    let id = OrderId::generate();

    let mut orders = MockOrderRepository::new();
    orders
        .expect_find_by_id()
        .returning(|id| Ok(Some(order(id))));

    let service = OrderManager::new(TestUnitOfWork::new().with_orders(orders).build());
    let found = service.find_by_id(&id).await.unwrap();

    assert_eq!(found.id, id);
    assert_eq!(found.id_user, 1);
    assert_eq!(found.client.username, "user1");
    assert_eq!(found.total_items, 2);
    assert_eq!(found.total, Decimal::new(3198, 2));
}

#[tokio::test]
async fn test_find_by_id_missing() {
    let mut orders = MockOrderRepository::new();
    orders.expect_find_by_id().returning(|_| Ok(None));

    let service = OrderManager::new(TestUnitOfWork::new().with_orders(orders).build());
    let result = service.find_by_id(&OrderId::generate()).await;

    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Order not found"));
}

#[tokio::test]
async fn test_find_all_pages() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_list()
        .returning(|_| Ok((vec![order(&OrderId::generate())], 21)));

    let service = OrderManager::new(TestUnitOfWork::new().with_orders(orders).build());
    let page = service
        .find_all(PaginationParams::default())
        .await
        .unwrap();

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn test_update_to_deleted_client_is_not_found() {
    let id = OrderId::generate();

    let mut orders = MockOrderRepository::new();
    orders
        .expect_find_by_id()
        .returning(|id| Ok(Some(order(id))));

    let mut clients = MockClientRepository::new();
    clients.expect_find_by_id().returning(|id| {
        let mut deleted = client(id);
        deleted.is_deleted = true;
        Ok(Some(deleted))
    });

    let service = OrderManager::new(
        TestUnitOfWork::new()
            .with_orders(orders)
            .with_clients(clients)
            .build(),
    );
    let result = service
        .update(
            &id,
            UpdateOrder {
                id_user: Some(7),
                order_lines: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Client not found"));
}

#[tokio::test]
async fn test_find_all_reports_the_sort_column_used() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_list()
        .withf(|params| params.sort_by == "id")
        .returning(|_| Ok((vec![], 0)));

    let service = OrderManager::new(TestUnitOfWork::new().with_orders(orders).build());
    let params = PaginationParams {
        sort_by: "no_such_column".to_string(),
        ..Default::default()
    };
    let page = service.find_all(params).await.unwrap();

    assert_eq!(page.sort_by, "id");
}

// =============================================================================
// Transactions
// =============================================================================

#[tokio::test]
async fn test_create_reserves_stock_and_inserts() {
    let laptop = Uuid::new_v4();

    let mut locked_products = MockTxProductRepository::new();
    locked_products
        .expect_find_for_update()
        .withf(move |ids| ids.to_vec() == vec![laptop])
        .times(1)
        .returning(move |_| Ok(catalog(&[(laptop, 10)])));
    locked_products
        .expect_save_stock()
        .withf(move |products| products[&laptop].stock == 8)
        .times(1)
        .returning(|_| Ok(()));

    let mut locked_orders = MockTxOrderRepository::new();
    locked_orders
        .expect_insert()
        .times(1)
        .returning(|order| Ok(order.clone()));

    let service = OrderManager::new(
        TestUnitOfWork::new()
            .with_clients(known_clients())
            .with_locked_products(locked_products)
            .with_locked_orders(locked_orders)
            .build(),
    );
    let created = service
        .create(CreateOrder {
            id_user: 1,
            order_lines: vec![line_request(laptop, 2)],
        })
        .await
        .unwrap();

    assert_eq!(created.id_user, 1);
    assert_eq!(created.total_items, 2);
    assert_eq!(created.total, price() * Decimal::from(2));
}

#[tokio::test]
async fn test_create_without_stock_leaves_stock_untouched() {
    let laptop = Uuid::new_v4();

    let mut locked_products = MockTxProductRepository::new();
    locked_products
        .expect_find_for_update()
        .returning(move |_| Ok(catalog(&[(laptop, 10)])));
    locked_products.expect_save_stock().never();

    let mut locked_orders = MockTxOrderRepository::new();
    locked_orders.expect_insert().never();

    let service = OrderManager::new(
        TestUnitOfWork::new()
            .with_clients(known_clients())
            .with_locked_products(locked_products)
            .with_locked_orders(locked_orders)
            .build(),
    );
    let result = service
        .create(CreateOrder {
            id_user: 1,
            order_lines: vec![line_request(laptop, 11)],
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn test_create_with_unknown_product_is_not_found() {
    let mut locked_products = MockTxProductRepository::new();
    locked_products
        .expect_find_for_update()
        .returning(|_| Ok(HashMap::new()));
    locked_products.expect_save_stock().never();

    let mut locked_orders = MockTxOrderRepository::new();
    locked_orders.expect_insert().never();

    let service = OrderManager::new(
        TestUnitOfWork::new()
            .with_clients(known_clients())
            .with_locked_products(locked_products)
            .with_locked_orders(locked_orders)
            .build(),
    );
    let result = service
        .create(CreateOrder {
            id_user: 1,
            order_lines: vec![line_request(Uuid::new_v4(), 1)],
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_update_returns_old_stock_then_reserves_new() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let id = OrderId::generate();
    let existing = order_with(&id, &[(a, 2), (b, 3)]);

    let mut orders = MockOrderRepository::new();
    let current = existing.clone();
    orders
        .expect_find_by_id()
        .returning(move |_| Ok(Some(current.clone())));

    let mut locked_orders = MockTxOrderRepository::new();
    let locked = existing.clone();
    locked_orders
        .expect_find_by_id()
        .times(1)
        .returning(move |_| Ok(Some(locked.clone())));
    locked_orders
        .expect_update()
        .withf(move |order| order.order_lines.len() == 1 && order.total_items == 6)
        .times(1)
        .returning(|order| Ok(order.clone()));

    let mut locked_products = MockTxProductRepository::new();
    locked_products
        .expect_find_for_update()
        .returning(move |_| Ok(catalog(&[(a, 5), (b, 4)])));
    locked_products
        .expect_save_stock()
        .withf(move |products| products[&a].stock == 7 && products[&b].stock == 1)
        .times(1)
        .returning(|_| Ok(()));

    let service = OrderManager::new(
        TestUnitOfWork::new()
            .with_orders(orders)
            .with_clients(known_clients())
            .with_locked_orders(locked_orders)
            .with_locked_products(locked_products)
            .build(),
    );
    let updated = service
        .update(
            &id,
            UpdateOrder {
                id_user: None,
                order_lines: Some(vec![line_request(b, 6)]),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, id);
    assert_eq!(updated.total_items, 6);
}

#[tokio::test]
async fn test_update_failing_check_leaves_stock_untouched() {
    let a = Uuid::new_v4();
    let id = OrderId::generate();
    let existing = order_with(&id, &[(a, 2)]);

    let mut orders = MockOrderRepository::new();
    let current = existing.clone();
    orders
        .expect_find_by_id()
        .returning(move |_| Ok(Some(current.clone())));

    let mut locked_orders = MockTxOrderRepository::new();
    locked_orders
        .expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    locked_orders.expect_update().never();

    let mut locked_products = MockTxProductRepository::new();
    locked_products
        .expect_find_for_update()
        .returning(move |_| Ok(catalog(&[(a, 3)])));
    locked_products.expect_save_stock().never();

    let service = OrderManager::new(
        TestUnitOfWork::new()
            .with_orders(orders)
            .with_clients(known_clients())
            .with_locked_orders(locked_orders)
            .with_locked_products(locked_products)
            .build(),
    );
    let result = service
        .update(
            &id,
            UpdateOrder {
                id_user: None,
                order_lines: Some(vec![line_request(a, 6)]),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn test_delete_returns_stock_and_deletes() {
    let a = Uuid::new_v4();
    let id = OrderId::generate();
    let existing = order_with(&id, &[(a, 2)]);

    let mut orders = MockOrderRepository::new();
    let current = existing.clone();
    orders
        .expect_find_by_id()
        .returning(move |_| Ok(Some(current.clone())));

    let mut locked_orders = MockTxOrderRepository::new();
    locked_orders
        .expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    let deleted = id.clone();
    locked_orders
        .expect_delete()
        .withf(move |id| *id == deleted)
        .times(1)
        .returning(|_| Ok(()));

    let mut locked_products = MockTxProductRepository::new();
    locked_products
        .expect_find_for_update()
        .returning(move |_| Ok(catalog(&[(a, 5)])));
    locked_products
        .expect_save_stock()
        .withf(move |products| products[&a].stock == 7)
        .times(1)
        .returning(|_| Ok(()));

    let service = OrderManager::new(
        TestUnitOfWork::new()
            .with_orders(orders)
            .with_locked_orders(locked_orders)
            .with_locked_products(locked_products)
            .build(),
    );

    service.delete(&id).await.unwrap();
}
