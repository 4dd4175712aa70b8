//! In-process fan-out of change notifications.
//!
//! One broadcast channel per [`NotificationEntity`]. Websocket connections
//! subscribe to the channel of the entity they watch; services publish after
//! a successful write.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::broadcast;

use crate::config::NOTIFICATION_CHANNEL_CAPACITY;
use crate::domain::{Notification, NotificationEntity, NotificationType};

#[derive(Clone)]
pub struct Notifier {
    channels: HashMap<NotificationEntity, broadcast::Sender<String>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_capacity(NOTIFICATION_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let channels = NotificationEntity::ALL
            .iter()
            .map(|entity| (*entity, broadcast::channel(capacity).0))
            .collect();
        Self { channels }
    }

    /// Serialize and broadcast a change. Never fails; problems are logged.
    /// Returns the number of subscribers that received it.
    pub fn publish<T: Serialize>(
        &self,
        entity: NotificationEntity,
        kind: NotificationType,
        data: &T,
    ) -> usize {
        let notification = Notification::new(entity, kind, data);
        let json = match serde_json::to_string(&notification) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(%entity, "Failed to serialize notification: {}", e);
                return 0;
            }
        };

        let Some(sender) = self.channels.get(&entity) else {
            tracing::warn!(%entity, "No channel for entity");
            return 0;
        };

        match sender.send(json) {
            Ok(receivers) => {
                tracing::debug!(%entity, ?kind, receivers, "Notification sent");
                receivers
            }
            // No subscribers connected
            Err(_) => 0,
        }
    }

    /// New receiver for `entity`, starting at the next message published.
    pub fn subscribe(&self, entity: NotificationEntity) -> broadcast::Receiver<String> {
        match self.channels.get(&entity) {
            Some(sender) => sender.subscribe(),
            // every entity gets a channel in `with_capacity`
            None => broadcast::channel(1).1,
        }
    }

    pub fn subscriber_count(&self, entity: NotificationEntity) -> usize {
        self.channels
            .get(&entity)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe(NotificationEntity::Products);

        let sent = notifier.publish(
            NotificationEntity::Products,
            NotificationType::Create,
            &serde_json::json!({"name": "Laptop"}),
        );
        assert_eq!(sent, 1);

        let message = rx.recv().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&message).unwrap();
        assert_eq!(value["entity"], "PRODUCTS");
        assert_eq!(value["type"], "CREATE");
        assert_eq!(value["data"]["name"], "Laptop");
    }

    #[tokio::test]
    async fn test_channels_are_separate() {
        let notifier = Notifier::new();
        let mut clients = notifier.subscribe(NotificationEntity::Clients);

        notifier.publish(
            NotificationEntity::Categories,
            NotificationType::Delete,
            &serde_json::json!({}),
        );

        assert!(matches!(
            clients.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let notifier = Notifier::new();
        let sent = notifier.publish(
            NotificationEntity::Clients,
            NotificationType::Update,
            &serde_json::json!({"id": 1}),
        );
        assert_eq!(sent, 0);
        assert_eq!(notifier.subscriber_count(NotificationEntity::Clients), 0);
    }

    #[tokio::test]
    async fn test_lagging_receiver_skips() {
        let notifier = Notifier::with_capacity(2);
        let mut rx = notifier.subscribe(NotificationEntity::Products);

        for i in 0..4 {
            notifier.publish(
                NotificationEntity::Products,
                NotificationType::Update,
                &serde_json::json!({ "i": i }),
            );
        }

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(2))
        ));
        let next: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(next["data"]["i"], 2);
    }
}
