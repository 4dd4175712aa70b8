//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{SignUp, TokenResponse};
use crate::types::Created;

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "user1")]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "John Doe")]
    pub name: String,
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    #[schema(example = "secret1", min_length = 5)]
    pub password: String,
    /// Must equal `password`
    #[schema(example = "secret1")]
    pub password_confirm: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "user1")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret1")]
    pub password: String,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
}

/// Register a new account and get a token
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Validation error or passwords don't match"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> AppResult<Created<TokenResponse>> {
    let token = state
        .auth_service
        .signup(SignUp {
            username: payload.username,
            email: payload.email,
            name: payload.name,
            password: payload.password,
            password_confirm: payload.password_confirm,
        })
        .await?;

    Ok(Created(token))
}

/// Sign in with username and password
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "Authentication",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .signin(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}
