//! Change events pushed to websocket subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which kind of change happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationType {
    Create,
    Update,
    Delete,
}

/// Resource family a notification belongs to. Each has its own channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationEntity {
    Products,
    Categories,
    Clients,
    Suppliers,
    Employees,
}

impl NotificationEntity {
    pub const ALL: [NotificationEntity; 5] = [
        NotificationEntity::Products,
        NotificationEntity::Categories,
        NotificationEntity::Clients,
        NotificationEntity::Suppliers,
        NotificationEntity::Employees,
    ];

    /// Name carried in the `entity` field of the envelope
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationEntity::Products => "PRODUCTS",
            NotificationEntity::Categories => "CATEGORY",
            NotificationEntity::Clients => "CLIENTS",
            NotificationEntity::Suppliers => "SUPPLIERS",
            NotificationEntity::Employees => "EMPLOYEE",
        }
    }
}

impl std::fmt::Display for NotificationEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification<T> {
    pub entity: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub data: T,
    pub created_at: DateTime<Utc>,
}

impl<T> Notification<T> {
    pub fn new(entity: NotificationEntity, kind: NotificationType, data: T) -> Self {
        Self {
            entity: entity.as_str().to_string(),
            kind,
            data,
            created_at: Utc::now(),
        }
    }
}
