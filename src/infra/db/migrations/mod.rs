//! Database migrations.
//!
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_categories_table;
mod m20240101_000003_create_products_table;
mod m20240101_000004_create_clients_table;
mod m20240101_000005_create_orders_table;
mod m20240101_000006_create_suppliers_table;
mod m20240101_000007_create_employees_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_categories_table::Migration),
            Box::new(m20240101_000003_create_products_table::Migration),
            Box::new(m20240101_000004_create_clients_table::Migration),
            Box::new(m20240101_000005_create_orders_table::Migration),
            Box::new(m20240101_000006_create_suppliers_table::Migration),
            Box::new(m20240101_000007_create_employees_table::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 7);
        assert!(names.last().is_some_and(|n| n.ends_with("create_employees_table")));
    }
}
