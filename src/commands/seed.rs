//! Seed command - Brings the schema up to date and inserts the sample orders.

use chrono::Utc;

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::db::seed::{sample_orders, seed_orders};
use crate::infra::{Database, OrderStore};

pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    // Connecting runs pending migrations, which creates the orders table
    let db = Database::connect(&config).await?;

    let orders = sample_orders(Utc::now())?;
    let repo = OrderStore::new(db.get_connection());
    let report = seed_orders(&repo, orders, args.skip_existing).await?;

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "Seeding finished"
    );
    Ok(())
}
