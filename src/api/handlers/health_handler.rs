//! Health check handler.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::api::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

#[derive(Debug, Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
    redis: ServiceStatus,
}

#[derive(Debug, Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceStatus {
    fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy",
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

/// Database and Redis connectivity
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ServiceStatus::from_result(state.database.ping().await);
    let redis = ServiceStatus::from_result(state.cache.ping().await);

    let all_healthy = database.is_healthy() && redis.is_healthy();
    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if all_healthy { "healthy" } else { "degraded" },
            services: ServiceHealth { database, redis },
        }),
    )
}
