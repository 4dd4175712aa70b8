//! Supplier service tests.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use tienda_api::domain::{CreateSupplier, NotificationEntity, SupplierFilter, UpdateSupplier};
use tienda_api::errors::AppError;
use tienda_api::infra::{MockCategoryRepository, MockSupplierRepository, Notifier};
use tienda_api::services::{SupplierManager, SupplierService};
use tienda_api::types::{PaginationParams, SortDirection};

use common::{category, supplier, TestUnitOfWork};

fn create_request(category: &str) -> CreateSupplier {
    CreateSupplier {
        name: "Acme".to_string(),
        contact: 612345678,
        address: "Calle Mayor 1".to_string(),
        category: category.to_string(),
        is_deleted: None,
    }
}

fn known_categories() -> MockCategoryRepository {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_name()
        .returning(|name| Ok(Some(category(name))));
    categories
}

#[tokio::test]
async fn test_list_keeps_known_sort_column() {
    let mut suppliers = MockSupplierRepository::new();
    suppliers
        .expect_list()
        .withf(|filter, params| !filter.is_deleted() && params.sort_by == "date_of_hire")
        .returning(|_, _| Ok((vec![supplier(Uuid::new_v4())], 1)));

    let service = SupplierManager::new(
        TestUnitOfWork::new().with_suppliers(suppliers).build(),
        Arc::new(Notifier::new()),
    );
    let params = PaginationParams {
        sort_by: "date_of_hire".to_string(),
        direction: SortDirection::Desc,
        ..Default::default()
    };
    let page = service
        .list(SupplierFilter::default(), params)
        .await
        .unwrap();

    assert_eq!(page.sort_by, "date_of_hire");
    assert_eq!(page.direction, SortDirection::Desc);
    assert_eq!(page.total_elements, 1);
}

#[tokio::test]
async fn test_create_resolves_category_and_notifies() {
    let mut suppliers = MockSupplierRepository::new();
    suppliers
        .expect_insert()
        .withf(|s| s.category.name == "Laptops" && !s.is_deleted)
        .times(1)
        .returning(|s| Ok(s.clone()));

    let notifier = Arc::new(Notifier::new());
    let mut rx = notifier.subscribe(NotificationEntity::Suppliers);

    let service = SupplierManager::new(
        TestUnitOfWork::new()
            .with_categories(known_categories())
            .with_suppliers(suppliers)
            .build(),
        notifier,
    );
    let created = service.create(create_request("Laptops")).await.unwrap();

    assert_eq!(created.name, "Acme");
    let message: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
    assert_eq!(message["entity"], "SUPPLIERS");
    assert_eq!(message["type"], "CREATE");
    assert_eq!(message["data"]["contact"], 612345678);
}

#[tokio::test]
async fn test_create_in_unknown_category_is_bad_request() {
    let mut categories = MockCategoryRepository::new();
    categories.expect_find_by_name().returning(|_| Ok(None));
    let mut suppliers = MockSupplierRepository::new();
    suppliers.expect_insert().never();

    let service = SupplierManager::new(
        TestUnitOfWork::new()
            .with_categories(categories)
            .with_suppliers(suppliers)
            .build(),
        Arc::new(Notifier::new()),
    );
    let result = service.create(create_request("Phones")).await;

    assert!(
        matches!(result, Err(AppError::BadRequest(msg)) if msg == "Category not found: Phones")
    );
}

#[tokio::test]
async fn test_update_moves_supplier_to_new_category() {
    let mut suppliers = MockSupplierRepository::new();
    suppliers
        .expect_find_by_id()
        .returning(|id| Ok(Some(supplier(id))));
    suppliers
        .expect_update()
        .withf(|s| s.category.name == "Phones" && s.address == "Gran Via 2")
        .times(1)
        .returning(|s| Ok(s.clone()));

    let service = SupplierManager::new(
        TestUnitOfWork::new()
            .with_categories(known_categories())
            .with_suppliers(suppliers)
            .build(),
        Arc::new(Notifier::new()),
    );
    let updated = service
        .update(
            Uuid::new_v4(),
            UpdateSupplier {
                address: Some("Gran Via 2".to_string()),
                category: Some("Phones".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Acme");
}

#[tokio::test]
async fn test_delete_missing_supplier_is_not_found() {
    let mut suppliers = MockSupplierRepository::new();
    suppliers.expect_find_by_id().returning(|_| Ok(None));
    suppliers.expect_delete().never();

    let service = SupplierManager::new(
        TestUnitOfWork::new().with_suppliers(suppliers).build(),
        Arc::new(Notifier::new()),
    );
    let result = service.delete(Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Supplier not found"));
}

#[tokio::test]
async fn test_delete_is_hard_and_notifies() {
    let mut suppliers = MockSupplierRepository::new();
    suppliers
        .expect_find_by_id()
        .returning(|id| Ok(Some(supplier(id))));
    suppliers.expect_delete().times(1).returning(|_| Ok(()));

    let notifier = Arc::new(Notifier::new());
    let mut rx = notifier.subscribe(NotificationEntity::Suppliers);

    let service = SupplierManager::new(
        TestUnitOfWork::new().with_suppliers(suppliers).build(),
        notifier,
    );
    service.delete(Uuid::new_v4()).await.unwrap();

    let message: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
    assert_eq!(message["type"], "DELETE");
}
