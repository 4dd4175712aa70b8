//! Product category entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    #[schema(example = "Laptops")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Body for both creating and renaming a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    #[schema(example = "Laptops")]
    pub name: String,
    /// Restores or hides the category on update
    #[serde(default)]
    pub is_deleted: Option<bool>,
}

/// Filters accepted by the category listing
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub is_deleted: Option<bool>,
}
