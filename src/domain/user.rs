//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{ROLE_ADMIN, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Check if this role can access a required role
    pub fn can_access(&self, required: &UserRole) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::User => matches!(required, UserRole::User),
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// API account. Distinct from [`Client`](super::Client), which is the store's customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Account creation data, already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// User update data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    /// New display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    /// New role (admin only)
    #[schema(example = "admin")]
    pub role: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "user1")]
    pub username: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "user")]
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let is_deleted = user.is_deleted();
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            created_at: user.created_at,
            is_deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(UserRole::from("user"), UserRole::User);
        assert_eq!(UserRole::from("anything"), UserRole::User);
    }

    #[test]
    fn test_role_access() {
        assert!(UserRole::Admin.can_access(&UserRole::User));
        assert!(!UserRole::User.can_access(&UserRole::Admin));
    }

    #[test]
    fn test_response_hides_hash() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: "user1".into(),
            email: "user1@example.com".into(),
            password_hash: "secret-hash".into(),
            name: "User One".into(),
            role: UserRole::User,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"is_deleted\":false"));
    }
}
