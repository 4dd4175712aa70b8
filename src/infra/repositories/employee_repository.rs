//! Employee repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::employee::{self, ActiveModel, Entity as EmployeeEntity};
use super::query::{contains_ci, sort_order};
use crate::domain::{CreateEmployee, Employee, EmployeeFilter};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn list(
        &self,
        filter: &EmployeeFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Employee>, u64)>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>>;

    async fn create(&self, employee: CreateEmployee) -> AppResult<Employee>;

    async fn update(&self, employee: &Employee) -> AppResult<Employee>;

    /// Hard delete
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(sort_by: &str) -> employee::Column {
    match sort_by {
        "name" => employee::Column::Name,
        "salary" => employee::Column::Salary,
        "position" => employee::Column::Position,
        "created_at" => employee::Column::CreatedAt,
        "updated_at" => employee::Column::UpdatedAt,
        _ => employee::Column::Id,
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn list(
        &self,
        filter: &EmployeeFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Employee>, u64)> {
        let mut query = EmployeeEntity::find();
        if let Some(name) = filter.name.as_deref() {
            query = query.filter(contains_ci(employee::Column::Name, name));
        }
        if let Some(min_salary) = filter.min_salary {
            query = query.filter(employee::Column::Salary.gte(min_salary));
        }
        if let Some(max_salary) = filter.max_salary {
            query = query.filter(employee::Column::Salary.lte(max_salary));
        }
        if let Some(position) = filter.position.as_deref() {
            query = query.filter(employee::Column::Position.eq(position));
        }

        let paginator = query
            .order_by(sort_column(&params.sort_by), sort_order(params))
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page_index()).await?;

        Ok((models.into_iter().map(Employee::from).collect(), total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Employee::from))
    }

    async fn create(&self, employee: CreateEmployee) -> AppResult<Employee> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: NotSet,
            name: Set(employee.name),
            salary: Set(employee.salary),
            position: Set(employee.position),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, "Employee"))?;

        Ok(Employee::from(model))
    }

    async fn update(&self, employee: &Employee) -> AppResult<Employee> {
        let model = ActiveModel {
            id: Set(employee.id),
            name: Set(employee.name.clone()),
            salary: Set(employee.salary),
            position: Set(employee.position.clone()),
            created_at: NotSet,
            updated_at: Set(chrono::Utc::now()),
        }
        .update(&self.db)
        .await?;

        Ok(Employee::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = EmployeeEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Employee"));
        }
        Ok(())
    }
}
