//! Employee service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::EMPLOYEE_SORT_COLUMNS;
use crate::domain::{
    CreateEmployee, Employee, EmployeeFilter, NotificationEntity, NotificationType,
    UpdateEmployee,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{Notifier, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn list(
        &self,
        filter: EmployeeFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Employee>>;

    async fn get(&self, id: i32) -> AppResult<Employee>;

    async fn create(&self, request: CreateEmployee) -> AppResult<Employee>;

    async fn update(&self, id: i32, request: UpdateEmployee) -> AppResult<Employee>;

    /// Hard delete
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct EmployeeManager<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<Notifier>,
}

impl<U: UnitOfWork> EmployeeManager<U> {
    pub fn new(uow: Arc<U>, notifier: Arc<Notifier>) -> Self {
        Self { uow, notifier }
    }

    fn notify(&self, kind: NotificationType, employee: &Employee) {
        self.notifier
            .publish(NotificationEntity::Employees, kind, employee);
    }
}

#[async_trait]
impl<U: UnitOfWork> EmployeeService for EmployeeManager<U> {
    async fn list(
        &self,
        filter: EmployeeFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Employee>> {
        let params = params.sortable_by(EMPLOYEE_SORT_COLUMNS);
        let (employees, total) = self.uow.employees().list(&filter, &params).await?;
        Ok(Paginated::new(employees, &params, total))
    }

    async fn get(&self, id: i32) -> AppResult<Employee> {
        self.uow
            .employees()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Employee")
    }

    async fn create(&self, request: CreateEmployee) -> AppResult<Employee> {
        let saved = self.uow.employees().create(request).await?;
        tracing::info!(employee_id = saved.id, position = %saved.position, "Employee created");

        self.notify(NotificationType::Create, &saved);
        Ok(saved)
    }

    async fn update(&self, id: i32, request: UpdateEmployee) -> AppResult<Employee> {
        let mut employee = self.get(id).await?;
        request.apply(&mut employee);

        let updated = self.uow.employees().update(&employee).await?;
        self.notify(NotificationType::Update, &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let employee = self.get(id).await?;

        self.uow.employees().delete(id).await?;
        tracing::info!(employee_id = id, "Employee deleted");

        self.notify(NotificationType::Delete, &employee);
        Ok(())
    }
}
