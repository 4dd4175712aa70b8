//! HTTP-level tests that need no database or Redis.
//!
//! Extractors and error responses are mounted on small stand-alone routers
//! and driven with `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;
use utoipa::OpenApi;
use uuid::Uuid;

use tienda_api::api::extractors::ValidatedJson;
use tienda_api::api::ApiDoc;
use tienda_api::domain::{CreateOrder, OrderId};
use tienda_api::errors::AppError;
use tienda_api::types::{Created, LinkedPage, NoContent, Paginated, PaginationParams};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn order_router() -> Router {
    Router::new().route(
        "/orders",
        post(|ValidatedJson(order): ValidatedJson<CreateOrder>| async move {
            Created(json!({ "id_user": order.id_user, "lines": order.order_lines.len() }))
        }),
    )
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Extractors
// =============================================================================

#[tokio::test]
async fn test_valid_order_body_is_accepted() {
    let body = json!({
        "id_user": 1,
        "order_lines": [
            { "id_product": Uuid::new_v4(), "quantity": 2, "price": 15.99 }
        ]
    });

    let response = order_router()
        .oneshot(post_json("/orders", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["id_user"], 1);
    assert_eq!(json["lines"], 1);
}

#[tokio::test]
async fn test_nested_validation_errors_name_the_line() {
    let body = json!({
        "id_user": 0,
        "order_lines": [
            { "id_product": Uuid::new_v4(), "quantity": 1, "price": 1.0 },
            { "id_product": Uuid::new_v4(), "quantity": 0, "price": 1.0 }
        ]
    });

    let response = order_router()
        .oneshot(post_json("/orders", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

    let message = json["error"]["message"].as_str().unwrap();
    assert!(message.contains("id_user: Client id must be positive"));
    assert!(message.contains("order_lines[1].quantity: Quantity must be between 1 and 10000"));
    assert!(!message.contains("order_lines[0]"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = order_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Error responses
// =============================================================================

#[tokio::test]
async fn test_error_status_codes() {
    let cases = [
        (AppError::not_found("Order"), StatusCode::NOT_FOUND, "NOT_FOUND"),
        (AppError::conflict("Category Laptops"), StatusCode::CONFLICT, "CONFLICT"),
        (AppError::bad_request("Category not found: X"), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        (AppError::Forbidden, StatusCode::FORBIDDEN, "FORBIDDEN"),
        (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
    ];

    for (error, status, code) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), status);
        assert_eq!(body_json(response).await["error"]["code"], code);
    }
}

#[tokio::test]
async fn test_error_messages_reach_the_client() {
    let response = AppError::not_found("Order").into_response();
    assert_eq!(body_json(response).await["error"]["message"], "Order not found");

    let response = AppError::conflict("Order 6536518de9b0d305f193b5ef").into_response();
    assert_eq!(
        body_json(response).await["error"]["message"],
        "Order 6536518de9b0d305f193b5ef already exists"
    );
}

#[tokio::test]
async fn test_internal_details_are_hidden() {
    let response = AppError::internal("connection pool exhausted").into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "An internal error occurred");
}

// =============================================================================
// Response types
// =============================================================================

#[tokio::test]
async fn test_created_and_no_content() {
    let response = Created(json!({ "ok": true })).into_response();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = NoContent.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[test]
fn test_page_serialization() {
    let params = PaginationParams {
        page: 1,
        size: 2,
        ..Default::default()
    };
    let page = Paginated::new(vec![Decimal::new(1999, 2)], &params, 5);
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["page"], 1);
    assert_eq!(json["size"], 2);
    assert_eq!(json["total_elements"], 5);
    assert_eq!(json["total_pages"], 3);
    assert_eq!(json["content"][0], 19.99);
}

fn paged_router() -> Router {
    let items = Router::new().route(
        "/",
        get(
            |axum::extract::OriginalUri(uri): axum::extract::OriginalUri,
             axum::extract::Query(params): axum::extract::Query<PaginationParams>| async move {
                let content: Vec<u64> = (0..params.limit()).collect();
                LinkedPage::new(Paginated::new(content, &params, 45), uri)
            },
        ),
    );
    Router::new().nest("/api/items", items)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_list_response_carries_link_header() {
    let response = paged_router()
        .oneshot(get_request("/api/items?page=1&size=10&direction=DESC"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let link = response.headers()[header::LINK].to_str().unwrap().to_string();
    assert!(link.contains("</api/items?direction=DESC&page=2&size=10>; rel=\"next\""));
    assert!(link.contains("</api/items?direction=DESC&page=0&size=10>; rel=\"prev\""));
    assert!(link.contains("</api/items?direction=DESC&page=4&size=10>; rel=\"last\""));

    let json = body_json(response).await;
    assert_eq!(json["direction"], "desc");
    assert_eq!(json["total_pages"], 5);
}

#[tokio::test]
async fn test_out_of_range_page_is_bad_request() {
    let response = paged_router()
        .oneshot(get_request("/api/items?page=99999999999999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_order_id_path_values() {
    let id = OrderId::parse("6536518DE9B0D305F193B5EF").unwrap();
    assert_eq!(id.as_str(), "6536518de9b0d305f193b5ef");

    assert!(OrderId::parse("not-an-id").is_err());
    assert!(serde_json::from_value::<OrderId>(json!("123")).is_err());
}

// =============================================================================
// OpenAPI document
// =============================================================================

#[test]
fn test_openapi_document_covers_every_resource() {
    let doc = ApiDoc::openapi();
    let paths = &doc.paths.paths;

    for path in [
        "/auth/signup",
        "/auth/signin",
        "/users/me",
        "/api/categories",
        "/api/products/{id}/image",
        "/api/clients/{id}/image",
        "/api/orders/user/{id_user}",
        "/api/suppliers/{id}",
        "/api/employee/{id}",
        "/storage",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }

    let components = doc.components.expect("components");
    assert!(components.security_schemes.contains_key("bearer_auth"));
    assert!(components.schemas.contains_key("Order"));
}
