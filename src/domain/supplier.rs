//! Product supplier. Each supplier serves one catalog category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::product::CategoryRef;
use super::validators::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub id: Uuid,
    #[schema(example = "Acme Components")]
    pub name: String,
    /// Contact phone number
    #[schema(example = 612345678)]
    pub contact: i32,
    #[schema(example = "Calle Mayor 1")]
    pub address: String,
    pub date_of_hire: DateTime<Utc>,
    pub category: CategoryRef,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSupplier {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 0, message = "Contact must not be negative"))]
    pub contact: i32,
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    /// Category name
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Laptops")]
    pub category: String,
    pub is_deleted: Option<bool>,
}

/// Partial supplier update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSupplier {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Contact must not be negative"))]
    pub contact: Option<i32>,
    #[validate(length(
        min = 2,
        max = 50,
        message = "Address must be between 2 and 50 characters"
    ))]
    pub address: Option<String>,
    /// Category name
    pub category: Option<String>,
    pub is_deleted: Option<bool>,
}

impl UpdateSupplier {
    /// Apply the present fields onto `supplier`. Category is resolved separately.
    pub fn apply(self, supplier: &mut Supplier) {
        if let Some(name) = self.name {
            supplier.name = name;
        }
        if let Some(contact) = self.contact {
            supplier.contact = contact;
        }
        if let Some(address) = self.address {
            supplier.address = address;
        }
        if let Some(is_deleted) = self.is_deleted {
            supplier.is_deleted = is_deleted;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupplierFilter {
    /// Case-insensitive substring of the category name
    pub category: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub contact: Option<i32>,
    /// Defaults to `false`, hiding deleted suppliers
    pub is_deleted: Option<bool>,
}

impl SupplierFilter {
    pub fn is_deleted(&self) -> bool {
        self.is_deleted.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateSupplier {
        CreateSupplier {
            name: "Acme".into(),
            contact: 612345678,
            address: "Calle Mayor 1".into(),
            category: "Laptops".into(),
            is_deleted: None,
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_create_rejects_blank_and_negative() {
        let mut req = create_request();
        req.name = " ".into();
        assert!(req.validate().is_err());

        let mut req = create_request();
        req.contact = -1;
        assert!(req.validate().is_err());

        let mut req = create_request();
        req.category = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_lengths() {
        let req = UpdateSupplier {
            name: Some("ab".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateSupplier {
            address: Some("x".repeat(51)),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        assert!(UpdateSupplier::default().validate().is_ok());
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let mut supplier = Supplier {
            id: Uuid::new_v4(),
            name: "Acme".into(),
            contact: 1,
            address: "Old street".into(),
            date_of_hire: Utc::now(),
            category: CategoryRef {
                id: Uuid::new_v4(),
                name: "Laptops".into(),
            },
            is_deleted: false,
        };

        UpdateSupplier {
            address: Some("New street".into()),
            ..Default::default()
        }
        .apply(&mut supplier);

        assert_eq!(supplier.address, "New street");
        assert_eq!(supplier.name, "Acme");
        assert_eq!(supplier.contact, 1);
    }

    #[test]
    fn test_filter_hides_deleted_by_default() {
        assert!(!SupplierFilter::default().is_deleted());
        let filter = SupplierFilter {
            is_deleted: Some(true),
            ..Default::default()
        };
        assert!(filter.is_deleted());
    }
}
