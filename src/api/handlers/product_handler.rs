//! Product handlers. Reads are public; writes go through the admin layer.

use axum::{
    extract::{Multipart, OriginalUri, Path, Query, State},
    middleware,
    response::Json,
    routing::{get, patch, post, put},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::{read_upload, ValidatedJson};
use crate::api::middleware::admin_middleware;
use crate::api::AppState;
use crate::domain::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::errors::AppResult;
use crate::types::{Created, LinkedPage, NoContent, PaginationParams, ProductPage};

pub fn product_routes(state: AppState) -> Router<AppState> {
    let admin = middleware::from_fn_with_state(state, admin_middleware);

    Router::new()
        .route(
            "/",
            get(list_products).merge(post(create_product).route_layer(admin.clone())),
        )
        .route(
            "/:id",
            get(get_product).merge(
                put(update_product)
                    .patch(update_product)
                    .delete(delete_product)
                    .route_layer(admin.clone()),
            ),
        )
        .route(
            "/:id/image",
            patch(update_product_image).route_layer(admin),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(PaginationParams, ProductFilter),
    responses((status = 200, description = "Page of products", body = ProductPage))
)]
pub async fn list_products(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<LinkedPage<Product>> {
    let page = state.product_service.list(filter, params).await?;
    Ok(LinkedPage::new(page, uri))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    if let Some(product) = state.cache.get_product(&id).await? {
        return Ok(Json(product));
    }

    let product = state.product_service.get(id).await?;
    state.cache.set_product(&product).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProduct>,
) -> AppResult<Created<Product>> {
    Ok(Created(state.product_service.create(payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let product = state.product_service.update(id, payload).await?;
    state.cache.set_product(&product).await?;
    Ok(Json(product))
}

/// Upload a new picture (multipart field `file`)
#[utoipa::path(
    patch,
    path = "/api/products/{id}/image",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "Field `file` with the image"),
    responses(
        (status = 200, description = "Image replaced", body = Product),
        (status = 400, description = "Missing or empty file"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<Product>> {
    let upload = read_upload(multipart).await?;
    let product = state
        .product_service
        .update_image(id, &upload.file_name, &upload.bytes)
        .await?;
    state.cache.set_product(&product).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.product_service.delete(id).await?;
    state.cache.invalidate_product(&id).await?;
    Ok(NoContent)
}
