//! User account handlers.

use axum::{
    extract::{Extension, OriginalUri, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{UpdateUser, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{LinkedPage, NoContent, PaginationParams, UserPage};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListFilter {
    /// Include soft-deleted accounts
    #[serde(default)]
    pub include_deleted: bool,
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_current_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/restore", post(restore_user))
}

async fn cached_user(state: &AppState, id: Uuid) -> AppResult<UserResponse> {
    if let Some(user) = state.cache.get_user(&id).await? {
        return Ok(user);
    }

    let user = UserResponse::from(state.user_service.get_user(id).await?);
    state.cache.set_user(&user).await?;
    Ok(user)
}

/// Get current authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(cached_user(&state, current_user.id).await?))
}

/// List users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PaginationParams, UserListFilter),
    responses(
        (status = 200, description = "Page of users", body = UserPage),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<UserListFilter>,
) -> AppResult<LinkedPage<UserResponse>> {
    require_admin(&current_user)?;
    let page = state
        .user_service
        .list_users(params, filter.include_deleted)
        .await?;
    Ok(LinkedPage::new(page.map(UserResponse::from), uri))
}

/// Get user by ID (own profile or admin)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Can only view own profile unless admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    if current_user.id != id {
        require_admin(&current_user)?;
    }

    Ok(Json(cached_user(&state, id).await?))
}

/// Update user (own profile; role changes admin only)
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if current_user.id != id || payload.role.is_some() {
        require_admin(&current_user)?;
    }

    let user = UserResponse::from(
        state
            .user_service
            .update_user(id, payload.name, payload.role)
            .await?,
    );
    state.cache.set_user(&user).await?;

    Ok(Json(user))
}

/// Soft delete a user (admin only, not yourself)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete your own account"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    if current_user.id == id {
        return Err(AppError::bad_request("Cannot delete your own account"));
    }

    state.user_service.delete_user(id).await?;
    state.cache.invalidate_user(&id).await?;

    Ok(NoContent)
}

/// Restore a soft-deleted user (admin only)
#[utoipa::path(
    post,
    path = "/users/{id}/restore",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User restored", body = UserResponse),
        (status = 400, description = "User is not deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn restore_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&current_user)?;

    let user = UserResponse::from(state.user_service.restore_user(id).await?);
    state.cache.invalidate_user(&id).await?;

    Ok(Json(user))
}
