//! Uploaded file serving and upload.

use axum::{
    body::Body,
    extract::{Multipart, Path, Request, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use utoipa::ToSchema;

use crate::api::extractors::read_upload;
use crate::api::middleware::auth_middleware;
use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::types::Created;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = "http://localhost:3000/storage/1698058637341_laptop.png")]
    pub url: String,
}

pub fn storage_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(upload_file).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
        .route("/:filename", get(serve_file))
}

/// Download a stored file. Content type is inferred from the extension.
#[utoipa::path(
    get,
    path = "/storage/{filename}",
    tag = "Storage",
    params(("filename" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "File not found")
    )
)]
pub async fn serve_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> AppResult<Response> {
    let path = state.storage.load(&filename).await?;

    let response = ServeFile::new(path)
        .oneshot(request)
        .await
        .map_err(|e| AppError::internal(format!("Failed to serve {}: {}", filename, e)))?;

    Ok(response.map(Body::new).into_response())
}

/// Upload a file (multipart field `file`)
#[utoipa::path(
    post,
    path = "/storage",
    tag = "Storage",
    security(("bearer_auth" = [])),
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "Field `file` with the contents"),
    responses(
        (status = 201, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing, empty or badly named file"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Created<UploadResponse>> {
    let upload = read_upload(multipart).await?;
    let stored = state.storage.store(&upload.file_name, &upload.bytes).await?;

    Ok(Created(UploadResponse {
        url: state.storage.url(&stored),
    }))
}
