//! Migrate command - schema management for the store tables.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Migrations are driven by the action, never implicitly on connect
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            tracing::info!("Pending migrations applied");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("Last migration rolled back");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                println!("{:<48} {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running every migration");
            db.fresh_migrations().await?;
            tracing::info!("Schema rebuilt");
        }
    }

    Ok(())
}
