//! Product repository. Every read joins the owning category.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::category::{self, Entity as CategoryEntity};
use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use super::query::{contains_ci, sort_order};
use crate::domain::{Product, ProductFilter};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(
        &self,
        filter: &ProductFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Product>, u64)>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// Insert using `product.category.id` as the foreign key
    async fn insert(&self, product: &Product) -> AppResult<Product>;

    async fn update(&self, product: &Product) -> AppResult<Product>;

    /// Hard delete
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(sort_by: &str) -> product::Column {
    match sort_by {
        "name" => product::Column::Name,
        "price" => product::Column::Price,
        "weight" => product::Column::Weight,
        "stock" => product::Column::Stock,
        "created_at" => product::Column::CreatedAt,
        _ => product::Column::Id,
    }
}

pub(crate) fn to_active_model(product: &Product) -> ActiveModel {
    ActiveModel {
        id: Set(product.id),
        name: Set(product.name.clone()),
        weight: Set(product.weight),
        price: Set(product.price),
        img: Set(product.img.clone()),
        stock: Set(product.stock),
        description: Set(product.description.clone()),
        category_id: Set(product.category.id),
        created_at: Set(product.created_at),
        updated_at: Set(product.updated_at),
        is_deleted: Set(product.is_deleted),
    }
}

/// Join a product row with its category, which the foreign key guarantees.
pub(crate) fn join_category(
    row: (product::Model, Option<category::Model>),
) -> AppResult<Product> {
    let (product, category) = row;
    let category = category.ok_or_else(|| {
        AppError::internal(format!("Product {} has no category row", product.id))
    })?;
    Ok(product.into_domain(category))
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn list(
        &self,
        filter: &ProductFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Product>, u64)> {
        let mut query = ProductEntity::find().find_also_related(CategoryEntity);

        if let Some(name) = filter.name.as_deref() {
            query = query.filter(contains_ci(product::Column::Name, name));
        }
        if let Some(max_weight) = filter.max_weight {
            query = query.filter(product::Column::Weight.lte(max_weight));
        }
        if let Some(max_price) = filter.max_price {
            query = query.filter(product::Column::Price.lte(max_price));
        }
        if let Some(min_stock) = filter.min_stock {
            query = query.filter(product::Column::Stock.gte(min_stock));
        }
        if let Some(category_name) = filter.category.as_deref() {
            query = query.filter(contains_ci(category::Column::Name, category_name));
        }

        let paginator = query
            .order_by(sort_column(&params.sort_by), sort_order(params))
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.page_index()).await?;

        let products = rows
            .into_iter()
            .map(join_category)
            .collect::<AppResult<Vec<_>>>()?;
        Ok((products, total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        ProductEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await?
            .map(join_category)
            .transpose()
    }

    async fn insert(&self, product: &Product) -> AppResult<Product> {
        to_active_model(product)
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Product"))?;

        self.find_by_id(product.id)
            .await?
            .ok_or_not_found("Product")
    }

    async fn update(&self, product: &Product) -> AppResult<Product> {
        let mut active = to_active_model(product);
        active.created_at = sea_orm::ActiveValue::NotSet;
        active.updated_at = Set(chrono::Utc::now());
        active.update(&self.db).await?;

        self.find_by_id(product.id)
            .await?
            .ok_or_not_found("Product")
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ProductEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Product"));
        }
        Ok(())
    }
}
