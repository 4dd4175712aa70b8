//! Orders, order lines and the stock rules applied when an order is placed.
//!
//! An order embeds a snapshot of the client at the time it was placed, so
//! later edits to the client never rewrite order history. Line totals are
//! always derived from quantity and unit price; values sent by a caller are
//! ignored.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validators::line_price;
use super::{Client, Product};
use crate::errors::AppError;

// =============================================================================
// Identifier
// =============================================================================

const ORDER_ID_BYTES: usize = 12;

/// 24 lowercase hex characters: 4 bytes of big-endian unix seconds followed
/// by 8 random bytes. Ids sort roughly by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "6536518de9b0d305f193b5ef")]
pub struct OrderId(String);

impl OrderId {
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    pub fn generate_at(at: DateTime<Utc>) -> Self {
        let seconds = at.timestamp().clamp(0, u32::MAX as i64) as u32;
        let random = Uuid::new_v4();

        let mut bytes = [0u8; ORDER_ID_BYTES];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);

        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Parse an identifier, normalising to lowercase.
    pub fn parse(raw: &str) -> Result<Self, OrderError> {
        let valid = raw.len() == ORDER_ID_BYTES * 2 && raw.bytes().all(|b| b.is_ascii_hexdigit());
        if !valid {
            return Err(OrderError::InvalidId(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation second encoded in the first four bytes
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let seconds = u32::from_str_radix(&self.0[..8], 16).ok()?;
        DateTime::from_timestamp(seconds as i64, 0)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OrderId {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for OrderId {
    type Error = OrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Reasons an order can be rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    #[error("Invalid order id: {0}")]
    InvalidId(String),

    #[error("Order has no items")]
    NotItems,

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Not enough stock for product {id}: requested {requested}, available {available}")]
    ProductNotStock {
        id: Uuid,
        requested: i32,
        available: i32,
    },

    #[error("Price of product {id} is {expected}, order says {given}")]
    ProductBadPrice {
        id: Uuid,
        expected: Decimal,
        given: Decimal,
    },

    #[error("Order amounts are out of range")]
    Overflow,
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::ProductNotFound(_) => AppError::NotFound(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

// =============================================================================
// Entities
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub id_product: Uuid,
    #[schema(example = 2)]
    pub quantity: i32,
    #[schema(value_type = f64, example = 15.99)]
    pub price: Decimal,
    #[schema(value_type = f64, example = 31.98)]
    pub total: Decimal,
}

fn line_total(quantity: i32, price: Decimal) -> Result<Decimal, OrderError> {
    Decimal::from(quantity)
        .checked_mul(price)
        .ok_or(OrderError::Overflow)
}

impl OrderLine {
    pub fn new(id_product: Uuid, quantity: i32, price: Decimal) -> Result<Self, OrderError> {
        Ok(Self {
            id_product,
            quantity,
            price,
            total: line_total(quantity, price)?,
        })
    }

    fn recalculate(&mut self) -> Result<(), OrderError> {
        self.total = line_total(self.quantity, self.price)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: OrderId,
    /// Id of the client who placed the order
    #[schema(example = 1)]
    pub id_user: i64,
    /// Client as it was when the order was placed
    pub client: Client,
    pub order_lines: Vec<OrderLine>,
    pub total_items: i32,
    #[schema(value_type = f64, example = 51.97)]
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl Order {
    /// New order stamped with a fresh id and `created_at == updated_at`.
    pub fn new(client: Client, order_lines: Vec<OrderLine>) -> Result<Self, OrderError> {
        let now = Utc::now();
        Self::from_parts(OrderId::generate_at(now), client, order_lines, now)
    }

    pub fn from_parts(
        id: OrderId,
        client: Client,
        order_lines: Vec<OrderLine>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let mut order = Self {
            id,
            id_user: client.id,
            client,
            order_lines,
            total_items: 0,
            total: Decimal::ZERO,
            created_at,
            updated_at: created_at,
            is_deleted: false,
        };
        order.recalculate()?;
        Ok(order)
    }

    /// Recompute every line total plus the order's `total_items` and `total`.
    pub fn recalculate(&mut self) -> Result<(), OrderError> {
        let mut total_items: i32 = 0;
        let mut total = Decimal::ZERO;
        for line in &mut self.order_lines {
            line.recalculate()?;
            total_items = total_items
                .checked_add(line.quantity)
                .ok_or(OrderError::Overflow)?;
            total = total.checked_add(line.total).ok_or(OrderError::Overflow)?;
        }
        self.total_items = total_items;
        self.total = total;
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Stock rules
// =============================================================================

/// Verify every line against the catalog before any stock is moved.
pub fn check_order(
    lines: &[OrderLine],
    products: &HashMap<Uuid, Product>,
) -> Result<(), OrderError> {
    if lines.is_empty() {
        return Err(OrderError::NotItems);
    }

    let mut requested: HashMap<Uuid, i32> = HashMap::new();
    for line in lines {
        let product = products
            .get(&line.id_product)
            .ok_or(OrderError::ProductNotFound(line.id_product))?;

        let wanted = requested.entry(line.id_product).or_insert(0);
        *wanted = wanted
            .checked_add(line.quantity)
            .ok_or(OrderError::Overflow)?;
        if product.stock < *wanted {
            return Err(OrderError::ProductNotStock {
                id: product.id,
                requested: *wanted,
                available: product.stock,
            });
        }

        if line.price != product.price {
            return Err(OrderError::ProductBadPrice {
                id: product.id,
                expected: product.price,
                given: line.price,
            });
        }
    }

    Ok(())
}

/// Take each line's quantity out of stock and reprice the line from the
/// catalog. Call [`check_order`] first.
pub fn reserve_stock(
    order: &mut Order,
    products: &mut HashMap<Uuid, Product>,
) -> Result<(), OrderError> {
    for line in &mut order.order_lines {
        let product = products
            .get_mut(&line.id_product)
            .ok_or(OrderError::ProductNotFound(line.id_product))?;

        if product.stock < line.quantity {
            return Err(OrderError::ProductNotStock {
                id: product.id,
                requested: line.quantity,
                available: product.stock,
            });
        }
        product.stock -= line.quantity;
        line.price = product.price;
    }

    order.recalculate()
}

/// Put each line's quantity back. Lines whose product no longer exists are skipped.
pub fn return_stock(lines: &[OrderLine], products: &mut HashMap<Uuid, Product>) {
    for line in lines {
        match products.get_mut(&line.id_product) {
            Some(product) => product.stock = product.stock.saturating_add(line.quantity),
            None => tracing::warn!(
                product_id = %line.id_product,
                "Product vanished, stock not returned"
            ),
        }
    }
}

// =============================================================================
// Request bodies
// =============================================================================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OrderLineRequest {
    pub id_product: Uuid,
    #[validate(range(
        min = 1,
        max = 10000,
        message = "Quantity must be between 1 and 10000"
    ))]
    pub quantity: i32,
    #[validate(custom(function = "line_price"))]
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
}

impl TryFrom<OrderLineRequest> for OrderLine {
    type Error = OrderError;

    fn try_from(req: OrderLineRequest) -> Result<Self, Self::Error> {
        OrderLine::new(req.id_product, req.quantity, req.price)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[validate(range(min = 1, message = "Client id must be positive"))]
    pub id_user: i64,
    #[validate(nested)]
    pub order_lines: Vec<OrderLineRequest>,
}

/// Partial order update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrder {
    #[validate(range(min = 1, message = "Client id must be positive"))]
    pub id_user: Option<i64>,
    #[validate(nested)]
    pub order_lines: Option<Vec<OrderLineRequest>>,
}
