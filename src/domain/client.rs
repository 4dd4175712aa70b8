//! Store customer. Orders embed a snapshot of this record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validators::{non_negative_decimal, PHONE_REGEX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Client {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "user1")]
    pub username: String,
    #[schema(example = "John")]
    pub name: String,
    #[schema(value_type = f64, example = 100.0)]
    pub balance: Decimal,
    #[schema(example = "john@clownsinformatics.com")]
    pub email: String,
    #[schema(example = "1234 Main St")]
    pub address: String,
    #[schema(example = "673456893")]
    pub phone: String,
    #[schema(value_type = String, format = Date, example = "1990-01-01")]
    pub birthdate: NaiveDate,
    pub image: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClient {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "non_negative_decimal"))]
    #[schema(value_type = f64, example = 100.0)]
    pub balance: Decimal,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(regex(path = *PHONE_REGEX, message = "Phone must have exactly 9 digits"))]
    pub phone: String,
    #[schema(value_type = String, format = Date, example = "1990-01-01")]
    pub birthdate: NaiveDate,
    pub image: Option<String>,
}

/// Partial client update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateClient {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: Option<String>,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(custom(function = "non_negative_decimal"))]
    #[schema(value_type = Option<f64>)]
    pub balance: Option<Decimal>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: Option<String>,
    #[validate(regex(path = *PHONE_REGEX, message = "Phone must have exactly 9 digits"))]
    pub phone: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub birthdate: Option<NaiveDate>,
    pub image: Option<String>,
    pub is_deleted: Option<bool>,
}

impl UpdateClient {
    pub fn apply(self, client: &mut Client) {
        if let Some(username) = self.username {
            client.username = username;
        }
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(balance) = self.balance {
            client.balance = balance;
        }
        if let Some(email) = self.email {
            client.email = email;
        }
        if let Some(address) = self.address {
            client.address = address;
        }
        if let Some(phone) = self.phone {
            client.phone = phone;
        }
        if let Some(birthdate) = self.birthdate {
            client.birthdate = birthdate;
        }
        if let Some(image) = self.image {
            client.image = Some(image);
        }
        if let Some(is_deleted) = self.is_deleted {
            client.is_deleted = is_deleted;
        }
        client.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientFilter {
    /// Case-insensitive substring of the username
    pub username: Option<String>,
    pub is_deleted: Option<bool>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn client(id: i64) -> Client {
        let now = Utc::now();
        Client {
            id,
            username: "user1".into(),
            name: "John".into(),
            balance: Decimal::new(10000, 2),
            email: "john@clownsinformatics.com".into(),
            address: "1234 Main St".into(),
            phone: "673456893".into(),
            birthdate: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            image: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateClient {
        CreateClient {
            username: "user1".into(),
            name: "John".into(),
            balance: Decimal::new(10000, 2),
            email: "john@clownsinformatics.com".into(),
            address: "1234 Main St".into(),
            phone: "673456893".into(),
            birthdate: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            image: None,
        }
    }

    #[test]
    fn test_valid_client() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_phone_must_be_nine_digits() {
        let mut req = create_request();
        req.phone = "673 456 893".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_balance_rejected() {
        let mut req = create_request();
        req.balance = Decimal::new(-100, 2);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut req = create_request();
        req.email = "not-an-email".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_birthdate_format() {
        let json = r#"{"username":"u","name":"n","balance":1.5,"email":"a@b.com",
            "address":"x","phone":"123456789","birthdate":"1990-01-01"}"#;
        let req: CreateClient = serde_json::from_str(json).unwrap();
        assert_eq!(req.birthdate, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert_eq!(req.balance, Decimal::new(15, 1));
    }

    #[test]
    fn test_partial_update() {
        let mut client = fixtures::client(1);
        UpdateClient {
            name: Some("Johnny".into()),
            ..Default::default()
        }
        .apply(&mut client);

        assert_eq!(client.name, "Johnny");
        assert_eq!(client.username, "user1");
    }
}
