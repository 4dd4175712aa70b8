//! Supplier handlers. Reads need any signed-in user, writes need an admin.

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
use crate::domain::{CreateSupplier, Supplier, SupplierFilter, UpdateSupplier};
use crate::errors::AppResult;
use crate::types::{Created, LinkedPage, NoContent, PaginationParams, SupplierPage};

pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route(
            "/:id",
            get(get_supplier)
                .put(update_supplier)
                .patch(update_supplier)
                .delete(delete_supplier),
        )
}

#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Suppliers",
    security(("bearer_auth" = [])),
    params(PaginationParams, SupplierFilter),
    responses(
        (status = 200, description = "Page of suppliers", body = SupplierPage),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<SupplierFilter>,
) -> AppResult<LinkedPage<Supplier>> {
    let page = state.supplier_service.list(filter, params).await?;
    Ok(LinkedPage::new(page, uri))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier", body = Supplier),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Supplier not found")
    )
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    Ok(Json(state.supplier_service.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Suppliers",
    security(("bearer_auth" = [])),
    request_body = CreateSupplier,
    responses(
        (status = 201, description = "Supplier created", body = Supplier),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn create_supplier(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSupplier>,
) -> AppResult<Created<Supplier>> {
    require_admin(&current_user)?;
    Ok(Created(state.supplier_service.create(payload).await?))
}

/// Also mounted as PATCH
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Supplier ID")),
    request_body = UpdateSupplier,
    responses(
        (status = 200, description = "Supplier updated", body = Supplier),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Supplier not found")
    )
)]
pub async fn update_supplier(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateSupplier>,
) -> AppResult<Json<Supplier>> {
    require_admin(&current_user)?;
    Ok(Json(state.supplier_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Supplier ID")),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Supplier not found")
    )
)]
pub async fn delete_supplier(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.supplier_service.delete(id).await?;
    Ok(NoContent)
}
