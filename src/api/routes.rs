//! Application route configuration.

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_routes, category_routes, client_routes, employee_routes, health, order_routes,
    product_routes, storage_routes, supplier_routes, user_routes, ws_routes,
};
use super::middleware::{
    admin_middleware, auth_middleware, rate_limit_auth_middleware, rate_limit_middleware,
};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::STORAGE_ROUTE;

/// REST resources under `/api`
fn api_routes(state: &AppState) -> Router<AppState> {
    let authenticated = || middleware::from_fn_with_state(state.clone(), auth_middleware);
    let admin = || middleware::from_fn_with_state(state.clone(), admin_middleware);

    Router::new()
        .nest("/orders", order_routes().route_layer(admin()))
        .nest("/categories", category_routes().route_layer(authenticated()))
        .nest("/products", product_routes(state.clone()))
        .nest("/clients", client_routes().route_layer(admin()))
        .nest("/suppliers", supplier_routes().route_layer(authenticated()))
        .nest("/employee", employee_routes().route_layer(authenticated()))
}

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/ws", ws_routes())
        .nest(STORAGE_ROUTE, storage_routes(state.clone()))
        .nest(
            "/auth",
            auth_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_auth_middleware,
            )),
        )
        .nest(
            "/users",
            user_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                ))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    rate_limit_middleware,
                )),
        )
        .nest(
            "/api",
            api_routes(&state).route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_middleware,
            )),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "Tienda API"
}
