//! Migration: catalog products.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_categories_table::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Products::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Products::Weight).double().not_null())
                    .col(ColumnDef::new(Products::Price).decimal_len(14, 2).not_null())
                    .col(ColumnDef::new(Products::Img).string().not_null())
                    .col(ColumnDef::new(Products::Stock).integer().not_null())
                    .col(
                        ColumnDef::new(Products::Description)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::CategoryId).uuid().not_null())
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_category")
                            .from(Products::Table, Products::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category_id")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Name,
    Weight,
    Price,
    Img,
    Stock,
    Description,
    CategoryId,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}
