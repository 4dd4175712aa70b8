//! Employee database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Employee;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub salary: Decimal,
    pub position: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Employee {
    fn from(model: Model) -> Self {
        Employee {
            id: model.id,
            name: model.name,
            salary: model.salary,
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
