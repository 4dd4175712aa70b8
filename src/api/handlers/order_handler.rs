//! Order handlers (admin only).
//!
//! Single orders are served read-through from Redis. Writes refresh or evict
//! the order entry and evict the products whose stock moved.

use axum::{
    extract::{OriginalUri, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateOrder, Order, OrderId, OrderLine, UpdateOrder};
use crate::errors::AppResult;
use crate::types::{Created, LinkedPage, NoContent, OrderPage, PaginationParams};

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/:id",
            get(get_order)
                .put(update_order)
                .patch(update_order)
                .delete(delete_order),
        )
        .route("/user/:id_user", get(list_orders_by_user))
}

/// Drop cached products whose stock an order touched. Failures are logged only.
async fn evict_products(state: &AppState, lines: &[OrderLine]) {
    for line in lines {
        if let Err(e) = state.cache.invalidate_product(&line.id_product).await {
            tracing::warn!(product_id = %line.id_product, "Failed to evict product: {}", e);
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of orders", body = OrderPage),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PaginationParams>,
) -> AppResult<LinkedPage<Order>> {
    let page = state.order_service.find_all(params).await?;
    Ok(LinkedPage::new(page, uri))
}

#[utoipa::path(
    get,
    path = "/api/orders/user/{id_user}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id_user" = i64, Path, description = "Client ID"), PaginationParams),
    responses((status = 200, description = "Page of the client's orders", body = OrderPage))
)]
pub async fn list_orders_by_user(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id_user): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> AppResult<LinkedPage<Order>> {
    let page = state.order_service.find_by_user(id_user, params).await?;
    Ok(LinkedPage::new(page, uri))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Order ID, 24 hex characters")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let id = OrderId::parse(&id)?;

    if let Some(order) = state.cache.get_order(&id).await? {
        return Ok(Json(order));
    }

    let order = state.order_service.find_by_id(&id).await?;
    state.cache.set_order(&order).await?;
    Ok(Json(order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 400, description = "No items, not enough stock or wrong price"),
        (status = 404, description = "Client or product not found")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrder>,
) -> AppResult<Created<Order>> {
    let order = state.order_service.create(payload).await?;
    evict_products(&state, &order.order_lines).await;
    Ok(Created(order))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Order ID, 24 hex characters")),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, description = "Malformed id, no items, not enough stock or wrong price"),
        (status = 404, description = "Order, client or product not found")
    )
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateOrder>,
) -> AppResult<Json<Order>> {
    let id = OrderId::parse(&id)?;
    let previous = state.order_service.find_by_id(&id).await?;

    let order = state.order_service.update(&id, payload).await?;
    state.cache.set_order(&order).await?;
    evict_products(&state, &previous.order_lines).await;
    evict_products(&state, &order.order_lines).await;

    Ok(Json(order))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Order ID, 24 hex characters")),
    responses(
        (status = 204, description = "Order deleted, stock returned"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    let id = OrderId::parse(&id)?;
    let order = state.order_service.find_by_id(&id).await?;

    state.order_service.delete(&id).await?;
    state.cache.invalidate_order(&id).await?;
    evict_products(&state, &order.order_lines).await;

    Ok(NoContent)
}
