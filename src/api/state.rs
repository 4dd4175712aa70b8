//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database, FileStorage, Notifier};
use crate::services::{
    AuthService, CategoryService, ClientService, EmployeeService, OrderService, ProductService,
    ServiceContainer, Services, SupplierService, UserService,
};

/// Shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub category_service: Arc<dyn CategoryService>,
    pub product_service: Arc<dyn ProductService>,
    pub client_service: Arc<dyn ClientService>,
    pub order_service: Arc<dyn OrderService>,
    pub supplier_service: Arc<dyn SupplierService>,
    pub employee_service: Arc<dyn EmployeeService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    pub database: Arc<Database>,
    pub storage: Arc<FileStorage>,
    /// Websocket notification channels
    pub notifier: Arc<Notifier>,
}

impl AppState {
    /// Build every service over the given infrastructure.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        storage: Arc<FileStorage>,
        notifier: Arc<Notifier>,
        config: Config,
    ) -> Self {
        let container = Services::from_connection(
            database.get_connection(),
            config,
            storage.clone(),
            notifier.clone(),
        );

        Self::new(&container, cache, database, storage, notifier)
    }

    /// Build from any container, e.g. one holding mocked services.
    pub fn new(
        services: &dyn ServiceContainer,
        cache: Arc<Cache>,
        database: Arc<Database>,
        storage: Arc<FileStorage>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            category_service: services.categories(),
            product_service: services.products(),
            client_service: services.clients(),
            order_service: services.orders(),
            supplier_service: services.suppliers(),
            employee_service: services.employees(),
            cache,
            database,
            storage,
            notifier,
        }
    }
}
