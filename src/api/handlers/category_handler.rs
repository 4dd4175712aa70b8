//! Category handlers. Reads need any signed-in user, writes need an admin.

use axum::{
    extract::{Extension, OriginalUri, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{Category, CategoryFilter, CategoryRequest};
use crate::errors::AppResult;
use crate::types::{CategoryPage, Created, LinkedPage, NoContent, PaginationParams};

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(PaginationParams, CategoryFilter),
    responses(
        (status = 200, description = "Page of categories", body = CategoryPage),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<CategoryFilter>,
) -> AppResult<LinkedPage<Category>> {
    let page = state.category_service.list(filter, params).await?;
    Ok(LinkedPage::new(page, uri))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.category_service.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn create_category(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> AppResult<Created<Category>> {
    require_admin(&current_user)?;
    Ok(Created(state.category_service.create(payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn update_category(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> AppResult<Json<Category>> {
    require_admin(&current_user)?;
    Ok(Json(state.category_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category soft-deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.category_service.delete(id).await?;
    Ok(NoContent)
}
