//! Rate limiting middleware using Redis counters.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::api::AppState;
use crate::config::{
    RATE_LIMIT_AUTH_REQUESTS, RATE_LIMIT_AUTH_WINDOW_SECONDS, RATE_LIMIT_REQUESTS,
    RATE_LIMIT_WINDOW_SECONDS,
};

#[derive(Debug)]
pub struct RateLimitError {
    pub retry_after: u64,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert("Retry-After", HeaderValue::from(self.retry_after));
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));

        (
            StatusCode::TOO_MANY_REQUESTS,
            headers,
            "Too many requests. Please try again later.",
        )
            .into_response()
    }
}

/// Window settings for one family of routes
#[derive(Debug, Clone, Copy)]
struct Limit {
    scope: &'static str,
    max_requests: u64,
    window_seconds: u64,
}

const GENERAL: Limit = Limit {
    scope: "general",
    max_requests: RATE_LIMIT_REQUESTS,
    window_seconds: RATE_LIMIT_WINDOW_SECONDS,
};

const AUTH: Limit = Limit {
    scope: "auth",
    max_requests: RATE_LIMIT_AUTH_REQUESTS,
    window_seconds: RATE_LIMIT_AUTH_WINDOW_SECONDS,
};

/// Client identifier: first X-Forwarded-For hop, then X-Real-IP, then the
/// peer address.
fn client_identifier(request: &Request) -> String {
    let headers = request.headers();

    if let Some(ip) = headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
    {
        return ip.trim().to_string();
    }

    if let Some(real_ip) = headers.get("X-Real-IP").and_then(|h| h.to_str().ok()) {
        return real_ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn enforce(
    state: &AppState,
    limit: Limit,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let client_id = client_identifier(&request);
    let key = format!("{}:{}", limit.scope, client_id);

    let (count, allowed) = match state
        .cache
        .check_rate_limit(&key, limit.max_requests, limit.window_seconds)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            // Fail closed while Redis is unavailable
            tracing::error!(error = %e, scope = limit.scope, "Rate limit check failed - denying request");
            return Err(RateLimitError {
                retry_after: limit.window_seconds,
            });
        }
    };

    if !allowed {
        tracing::warn!(client = %client_id, count, scope = limit.scope, "Rate limit exceeded");
        return Err(RateLimitError {
            retry_after: limit.window_seconds,
        });
    }

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(limit.max_requests));
    headers.insert(
        "X-RateLimit-Remaining",
        HeaderValue::from(limit.max_requests.saturating_sub(count)),
    );

    Ok(response)
}

/// General limit: RATE_LIMIT_REQUESTS per RATE_LIMIT_WINDOW_SECONDS.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    enforce(&state, GENERAL, request, next).await
}

/// Stricter limit for sign-in and sign-up.
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    enforce(&state, AUTH, request, next).await
}
