//! Store staff.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validators::non_negative_decimal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(value_type = f64, example = 1800.0)]
    pub salary: Decimal,
    #[schema(example = "Cashier")]
    pub position: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    pub name: String,
    #[validate(custom(function = "non_negative_decimal"))]
    #[schema(value_type = f64, example = 1800.0)]
    pub salary: Decimal,
    #[validate(length(
        min = 3,
        max = 50,
        message = "Position must be between 3 and 50 characters"
    ))]
    pub position: String,
}

/// Partial employee update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "non_negative_decimal"))]
    #[schema(value_type = Option<f64>)]
    pub salary: Option<Decimal>,
    #[validate(length(
        min = 3,
        max = 50,
        message = "Position must be between 3 and 50 characters"
    ))]
    pub position: Option<String>,
}

impl UpdateEmployee {
    pub fn apply(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
        if let Some(position) = self.position {
            employee.position = position;
        }
        employee.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    #[param(value_type = Option<f64>)]
    pub min_salary: Option<Decimal>,
    #[param(value_type = Option<f64>)]
    pub max_salary: Option<Decimal>,
    /// Exact position
    pub position: Option<String>,
}
