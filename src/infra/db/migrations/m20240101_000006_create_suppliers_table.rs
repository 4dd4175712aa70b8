//! Migration: product suppliers.

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
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Suppliers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Suppliers::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Suppliers::Contact).integer().not_null())
                    .col(ColumnDef::new(Suppliers::Address).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Suppliers::DateOfHire)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Suppliers::CategoryId).uuid().not_null())
                    .col(
                        ColumnDef::new(Suppliers::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_suppliers_category")
                            .from(Suppliers::Table, Suppliers::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_suppliers_category_id")
                    .table(Suppliers::Table)
                    .col(Suppliers::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Suppliers {
    Table,
    Id,
    Name,
    Contact,
    Address,
    DateOfHire,
    CategoryId,
    IsDeleted,
}
