//! Sample data for the `orders` store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Client, Order, OrderId, OrderLine};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::OrderRepository;

const SEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Outcome of one seeding run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// The literal sample orders. Client timestamps are set to `now`.
pub fn sample_orders(now: DateTime<Utc>) -> AppResult<Vec<Order>> {
    let client = Client {
        id: 1,
        username: "user1".to_string(),
        name: "John".to_string(),
        balance: Decimal::new(10000, 2),
        email: "john@clownsinformatics.com".to_string(),
        address: "1234 Main St".to_string(),
        phone: "673 456 893".to_string(),
        birthdate: date("1990-01-01")?,
        image: Some("https://i.imgur.com/4M34hi2.jpg".to_string()),
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };

    let lines = vec![
        OrderLine::new(
            product_id("3512e012-7028-405c-8397-b39886006212")?,
            1,
            Decimal::new(1999, 2),
        )?,
        OrderLine::new(
            product_id("76549b87-23a2-4065-8a86-914207290329")?,
            2,
            Decimal::new(1599, 2),
        )?,
    ];

    let id = OrderId::parse("6536518de9b0d305f193b5ef")?;
    let order = Order::from_parts(id, client, lines, timestamp("2023-10-23T12:57:17.3411925")?)?;

    Ok(vec![order])
}

/// Insert `orders` one by one. An id that is already taken fails the run,
/// unless `skip_existing` is set, in which case it is logged and skipped.
pub async fn seed_orders(
    repo: &dyn OrderRepository,
    orders: Vec<Order>,
    skip_existing: bool,
) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    for order in orders {
        match repo.insert(&order).await {
            Ok(saved) => {
                tracing::info!(order_id = %saved.id, total = %saved.total, "Seeded order");
                report.inserted += 1;
            }
            Err(AppError::Conflict(msg)) if skip_existing => {
                tracing::warn!(order_id = %order.id, "Skipping existing order: {}", msg);
                report.skipped += 1;
            }
            Err(e) => {
                tracing::error!(order_id = %order.id, "Seeding failed: {}", e);
                return Err(e);
            }
        }
    }

    Ok(report)
}

fn date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AppError::internal(format!("Bad seed date {}: {}", raw, e)))
}

/// Seed timestamps carry no zone; they are taken as UTC.
fn timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, SEED_TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|e| AppError::internal(format!("Bad seed timestamp {}: {}", raw, e)))
}

fn product_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::internal(format!("Bad seed uuid {}: {}", raw, e)))
}
