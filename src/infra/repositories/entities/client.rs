//! Client database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Client;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub balance: Decimal,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub birthdate: Date,
    pub image: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Client {
    fn from(model: Model) -> Self {
        Client {
            id: model.id,
            username: model.username,
            name: model.name,
            balance: model.balance,
            email: model.email,
            address: model.address,
            phone: model.phone,
            birthdate: model.birthdate,
            image: model.image,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
