//! Supplier database entity. Belongs to one category.

use sea_orm::entity::prelude::*;

use crate::domain::{CategoryRef, Supplier};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub contact: i32,
    pub address: String,
    pub date_of_hire: DateTimeUtc,
    pub category_id: Uuid,
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

// The generated `Column` enum has no `PartialEq`; tests compare columns.
#[cfg(test)]
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Model {
    pub fn into_domain(self, category: super::category::Model) -> Supplier {
        Supplier {
            id: self.id,
            name: self.name,
            contact: self.contact,
            address: self.address,
            date_of_hire: self.date_of_hire,
            category: CategoryRef {
                id: category.id,
                name: category.name,
            },
            is_deleted: self.is_deleted,
        }
    }
}
