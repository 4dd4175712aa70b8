//! Migration: the `orders` store.
//!
//! The client snapshot and the order lines are embedded documents, kept as
//! JSONB so an order never changes when its client or products do.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .char_len(24)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::IdUser).big_integer().not_null())
                    .col(ColumnDef::new(Orders::Client).json_binary().not_null())
                    .col(ColumnDef::new(Orders::OrderLines).json_binary().not_null())
                    .col(ColumnDef::new(Orders::TotalItems).integer().not_null())
                    .col(ColumnDef::new(Orders::Total).decimal_len(14, 2).not_null())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_id_user")
                    .table(Orders::Table)
                    .col(Orders::IdUser)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    IdUser,
    Client,
    OrderLines,
    TotalItems,
    Total,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}
