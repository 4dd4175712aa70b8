//! Catalog product entity and its request bodies.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::validators::{non_negative_decimal, not_blank};
use crate::config::DEFAULT_PRODUCT_IMAGE;

/// Category as embedded in a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "Laptop Pro 14")]
    pub name: String,
    pub weight: f64,
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
    pub img: String,
    pub stock: i32,
    pub description: String,
    pub category: CategoryRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl Product {
    /// True while the product still points at the placeholder picture
    pub fn has_default_image(&self) -> bool {
        self.img.is_empty() || self.img == DEFAULT_PRODUCT_IMAGE
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    pub weight: f64,
    #[validate(custom(function = "non_negative_decimal"))]
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
    pub img: Option<String>,
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i32,
    #[validate(length(
        min = 3,
        max = 255,
        message = "Description must be between 3 and 255 characters"
    ))]
    pub description: String,
    /// Category name
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Laptops")]
    pub category: String,
}

/// Partial product update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    pub weight: Option<f64>,
    #[validate(custom(function = "non_negative_decimal"))]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub img: Option<String>,
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: Option<i32>,
    #[validate(length(
        min = 3,
        max = 255,
        message = "Description must be between 3 and 255 characters"
    ))]
    pub description: Option<String>,
    /// Category name
    pub category: Option<String>,
    pub is_deleted: Option<bool>,
}

impl UpdateProduct {
    /// Apply the present fields onto `product`. Category is resolved separately.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(weight) = self.weight {
            product.weight = weight;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(img) = self.img {
            product.img = img;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(is_deleted) = self.is_deleted {
            product.is_deleted = is_deleted;
        }
        product.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub max_weight: Option<f64>,
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
    pub min_stock: Option<i32>,
    /// Case-insensitive substring of the category name
    pub category: Option<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn product(id: Uuid, price: Decimal, stock: i32) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: "Test product".into(),
            weight: 1.5,
            price,
            img: DEFAULT_PRODUCT_IMAGE.into(),
            stock,
            description: "A product used in tests".into(),
            category: CategoryRef {
                id: Uuid::new_v4(),
                name: "Laptops".into(),
            },
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }
}
