//! Authentication service - account sign-up, sign-in and token checks.
//!
//! Password hashing lives in the domain `Password` value object; repository
//! access goes through the Unit of Work.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{password::DUMMY_HASH, NewUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Sign-up data as received from the client
#[derive(Debug, Clone)]
pub struct SignUp {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub password_confirm: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and return a token for it
    async fn signup(&self, request: SignUp) -> AppResult<TokenResponse>;

    /// Check credentials and return a token
    async fn signin(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn signup(&self, request: SignUp) -> AppResult<TokenResponse> {
        if request.password != request.password_confirm {
            return Err(AppError::bad_request("Passwords don't match"));
        }

        // Deleted accounts keep their username and email reserved
        if self
            .uow
            .users()
            .exists_by_username_or_email(&request.username, &request.email)
            .await?
        {
            return Err(AppError::conflict("Username or email"));
        }

        let password_hash = Password::new(&request.password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
                name: request.name,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User signed up");
        generate_token(&user, &self.config)
    }

    async fn signin(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_username(&username).await?;

        // Verify against a dummy hash when the user is missing so both paths
        // cost the same.
        let hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_HASH.to_string());
        let password_valid = Password::from_hash(hash).verify(&password);

        match user {
            Some(user) if password_valid => generate_token(&user, &self.config),
            _ => {
                tracing::debug!(%username, "Sign-in rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
