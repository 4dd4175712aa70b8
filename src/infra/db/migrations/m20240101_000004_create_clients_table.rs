//! Migration: store customers.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::Username).string_len(100).not_null())
                    .col(ColumnDef::new(Clients::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Clients::Balance).decimal_len(14, 2).not_null())
                    .col(ColumnDef::new(Clients::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Clients::Address).string().not_null())
                    .col(ColumnDef::new(Clients::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Clients::Birthdate).date().not_null())
                    .col(ColumnDef::new(Clients::Image).string().null())
                    .col(
                        ColumnDef::new(Clients::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Clients::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Clients {
    Table,
    Id,
    Username,
    Name,
    Balance,
    Email,
    Address,
    Phone,
    Birthdate,
    Image,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}
