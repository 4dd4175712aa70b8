//! Order database entity. Client and lines are stored as JSONB documents.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Order, OrderId};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Char(Some(24))")]
    pub id: String,
    pub id_user: i64,
    #[sea_orm(column_type = "JsonBinary")]
    pub client: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub order_lines: Json,
    pub total_items: i32,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub total: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Order {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let corrupt = |what: &str, e: serde_json::Error| {
            AppError::internal(format!("Order {} has a corrupt {}: {}", model.id, what, e))
        };

        Ok(Order {
            id: OrderId::parse(&model.id)
                .map_err(|e| AppError::internal(format!("Stored order id: {}", e)))?,
            id_user: model.id_user,
            client: serde_json::from_value(model.client.clone()).map_err(|e| corrupt("client", e))?,
            order_lines: serde_json::from_value(model.order_lines.clone())
                .map_err(|e| corrupt("order_lines", e))?,
            total_items: model.total_items,
            total: model.total,
            created_at: model.created_at,
            updated_at: model.updated_at,
            is_deleted: model.is_deleted,
        })
    }
}

impl TryFrom<&Order> for ActiveModel {
    type Error = AppError;

    fn try_from(order: &Order) -> AppResult<Self> {
        let to_json = |what: &str, value: serde_json::Result<Json>| {
            value.map_err(|e| AppError::internal(format!("Cannot encode order {}: {}", what, e)))
        };

        Ok(ActiveModel {
            id: Set(order.id.to_string()),
            id_user: Set(order.id_user),
            client: Set(to_json("client", serde_json::to_value(&order.client))?),
            order_lines: Set(to_json("order_lines", serde_json::to_value(&order.order_lines))?),
            total_items: Set(order.total_items),
            total: Set(order.total),
            created_at: Set(order.created_at),
            updated_at: Set(order.updated_at),
            is_deleted: Set(order.is_deleted),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::fixtures::client;
    use crate::domain::OrderLine;
    use sea_orm::ActiveValue;
    use uuid::Uuid;

    #[test]
    fn test_document_round_trip() {
        let order = Order::new(
            client(1),
            vec![OrderLine::new(Uuid::new_v4(), 2, "15.99".parse().unwrap()).unwrap()],
        )
        .unwrap();

        let active = ActiveModel::try_from(&order).unwrap();
        let model = Model {
            id: active.id.unwrap(),
            id_user: active.id_user.unwrap(),
            client: active.client.unwrap(),
            order_lines: active.order_lines.unwrap(),
            total_items: active.total_items.unwrap(),
            total: active.total.unwrap(),
            created_at: active.created_at.unwrap(),
            updated_at: active.updated_at.unwrap(),
            is_deleted: active.is_deleted.unwrap(),
        };

        assert_eq!(Order::try_from(model).unwrap(), order);
    }

    #[test]
    fn test_corrupt_document_is_internal_error() {
        let order = Order::new(client(1), vec![]).unwrap();
        let mut active = ActiveModel::try_from(&order).unwrap();
        active.order_lines = ActiveValue::Set(serde_json::json!({"not": "a list"}));

        let model = Model {
            id: active.id.unwrap(),
            id_user: active.id_user.unwrap(),
            client: active.client.unwrap(),
            order_lines: active.order_lines.unwrap(),
            total_items: 0,
            total: Decimal::ZERO,
            created_at: order.created_at,
            updated_at: order.updated_at,
            is_deleted: false,
        };

        assert!(matches!(Order::try_from(model), Err(AppError::Internal(_))));
    }
}
