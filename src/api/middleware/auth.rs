//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, ROLE_ADMIN};
use crate::errors::AppError;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

fn authenticate(state: &AppState, request: &Request) -> Result<CurrentUser, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    Ok(CurrentUser {
        id: claims.sub,
        username: claims.username,
        role: claims.role,
    })
}

/// JWT authentication middleware.
///
/// Validates the bearer token and injects [`CurrentUser`] into the request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current_user = authenticate(&state, &request)?;
    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Same as [`auth_middleware`] but only lets admins through.
pub async fn admin_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current_user = authenticate(&state, &request)?;
    require_admin(&current_user)?;
    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require admin role, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            username: "user1".into(),
            role: role.into(),
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user("admin")).is_ok());
        assert!(matches!(
            require_admin(&user("user")),
            Err(AppError::Forbidden)
        ));
    }
}
