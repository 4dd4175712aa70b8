//! Websocket notification feeds, one per entity.
//!
//! On connect the server greets the client, then forwards every change
//! notification of the watched entity. Text sent by the client is echoed.
//! A client that falls behind skips the messages it missed.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};

use crate::api::AppState;
use crate::domain::NotificationEntity;

pub fn ws_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products_feed))
        .route("/categories", get(categories_feed))
        .route("/clients", get(clients_feed))
        .route("/suppliers", get(suppliers_feed))
        .route("/employees", get(employees_feed))
}

pub async fn products_feed(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    upgrade(ws, state, NotificationEntity::Products)
}

pub async fn categories_feed(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    upgrade(ws, state, NotificationEntity::Categories)
}

pub async fn clients_feed(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    upgrade(ws, state, NotificationEntity::Clients)
}

pub async fn suppliers_feed(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    upgrade(ws, state, NotificationEntity::Suppliers)
}

pub async fn employees_feed(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    upgrade(ws, state, NotificationEntity::Employees)
}

fn upgrade(ws: WebSocketUpgrade, state: AppState, entity: NotificationEntity) -> Response {
    let receiver = state.notifier.subscribe(entity);
    ws.on_upgrade(move |socket| handle_socket(socket, entity, receiver))
}

pub(crate) fn greeting(entity: NotificationEntity) -> String {
    format!("Updates Web socket: {} - Tienda API", entity)
}

async fn handle_socket(
    socket: WebSocket,
    entity: NotificationEntity,
    mut notifications: broadcast::Receiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();
    tracing::debug!(%entity, "Websocket connected");

    if sender.send(Message::Text(greeting(entity))).await.is_err() {
        return;
    }

    // Echoes from the receive task are funnelled through the send task so
    // only one task owns the sink.
    let (echo_tx, mut echo_rx) = mpsc::channel::<String>(16);

    let mut send_task = tokio::spawn(async move {
        loop {
            let outgoing = tokio::select! {
                received = notifications.recv() => match received {
                    Ok(json) => json,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(%entity, skipped, "Websocket subscriber lagging");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                echo = echo_rx.recv() => match echo {
                    Some(text) => text,
                    None => break,
                },
            };

            if sender.send(Message::Text(outgoing)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => {
                    if echo_tx.send(text).await.is_err() {
                        break;
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::debug!(%entity, "Websocket disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_names_entity() {
        assert_eq!(
            greeting(NotificationEntity::Products),
            "Updates Web socket: PRODUCTS - Tienda API"
        );
        assert!(greeting(NotificationEntity::Categories).contains("CATEGORY"));
    }
}
