//! Product database entity. Belongs to one category.

use sea_orm::entity::prelude::*;

use crate::domain::{CategoryRef, Product};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub weight: f64,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub price: Decimal,
    pub img: String,
    pub stock: i32,
    pub description: String,
    pub category_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Combine with the owning category row into the domain product.
    pub fn into_domain(self, category: super::category::Model) -> Product {
        Product {
            id: self.id,
            name: self.name,
            weight: self.weight,
            price: self.price,
            img: self.img,
            stock: self.stock,
            description: self.description,
            category: CategoryRef {
                id: category.id,
                name: category.name,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
            is_deleted: self.is_deleted,
        }
    }
}
