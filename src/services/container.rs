//! Service Container - one place to build and reach every service.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CategoryManager, CategoryService, ClientManager, ClientService,
    EmployeeManager, EmployeeService, OrderManager, OrderService, ProductManager, ProductService,
    SupplierManager, SupplierService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{FileStorage, Notifier, Persistence};

/// Source of every service, so `AppState` can be built from any wiring.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn categories(&self) -> Arc<dyn CategoryService>;

    fn products(&self) -> Arc<dyn ProductService>;

    fn clients(&self) -> Arc<dyn ClientService>;

    fn orders(&self) -> Arc<dyn OrderService>;

    fn suppliers(&self) -> Arc<dyn SupplierService>;

    fn employees(&self) -> Arc<dyn EmployeeService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    category_service: Arc<dyn CategoryService>,
    product_service: Arc<dyn ProductService>,
    client_service: Arc<dyn ClientService>,
    order_service: Arc<dyn OrderService>,
    supplier_service: Arc<dyn SupplierService>,
    employee_service: Arc<dyn EmployeeService>,
}

impl Services {
    /// Wire every service over one SeaORM-backed Unit of Work.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        storage: Arc<FileStorage>,
        notifier: Arc<Notifier>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            category_service: Arc::new(CategoryManager::new(uow.clone(), notifier.clone())),
            product_service: Arc::new(ProductManager::new(
                uow.clone(),
                storage.clone(),
                notifier.clone(),
            )),
            client_service: Arc::new(ClientManager::new(
                uow.clone(),
                storage,
                notifier.clone(),
            )),
            supplier_service: Arc::new(SupplierManager::new(uow.clone(), notifier.clone())),
            employee_service: Arc::new(EmployeeManager::new(uow.clone(), notifier)),
            order_service: Arc::new(OrderManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryService> {
        self.category_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    fn clients(&self) -> Arc<dyn ClientService> {
        self.client_service.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.order_service.clone()
    }

    fn suppliers(&self) -> Arc<dyn SupplierService> {
        self.supplier_service.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }
}
