//! Client handlers (admin only).

use axum::{
    extract::{Multipart, OriginalUri, Path, Query, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{read_upload, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Client, ClientFilter, CreateClient, UpdateClient};
use crate::errors::AppResult;
use crate::types::{ClientPage, Created, LinkedPage, NoContent, PaginationParams};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageOptions {
    /// Store the public URL instead of the bare file name
    #[serde(default = "default_with_url")]
    pub with_url: bool,
}

fn default_with_url() -> bool {
    true
}

pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client)
                .put(update_client)
                .patch(update_client)
                .delete(delete_client),
        )
        .route("/:id/image", patch(update_client_image))
}

#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    security(("bearer_auth" = [])),
    params(PaginationParams, ClientFilter),
    responses(
        (status = 200, description = "Page of clients", body = ClientPage),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_clients(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<ClientFilter>,
) -> AppResult<LinkedPage<Client>> {
    let page = state.client_service.list(filter, params).await?;
    Ok(LinkedPage::new(page, uri))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clients",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client", body = Client),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    if let Some(client) = state.cache.get_client(id).await? {
        return Ok(Json(client));
    }

    let client = state.client_service.get(id).await?;
    state.cache.set_client(&client).await?;
    Ok(Json(client))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    security(("bearer_auth" = [])),
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateClient>,
) -> AppResult<Created<Client>> {
    Ok(Created(state.client_service.create(payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clients",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Client ID")),
    request_body = UpdateClient,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateClient>,
) -> AppResult<Json<Client>> {
    let client = state.client_service.update(id, payload).await?;
    if client.is_deleted {
        state.cache.invalidate_client(id).await?;
    } else {
        state.cache.set_client(&client).await?;
    }
    Ok(Json(client))
}

/// Upload a new picture (multipart field `file`)
#[utoipa::path(
    patch,
    path = "/api/clients/{id}/image",
    tag = "Clients",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Client ID"), ImageOptions),
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "Field `file` with the image"),
    responses(
        (status = 200, description = "Image replaced", body = Client),
        (status = 400, description = "Missing or empty file"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn update_client_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(options): Query<ImageOptions>,
    multipart: Multipart,
) -> AppResult<Json<Client>> {
    let upload = read_upload(multipart).await?;
    let client = state
        .client_service
        .update_image(id, &upload.file_name, &upload.bytes, options.with_url)
        .await?;
    state.cache.set_client(&client).await?;
    Ok(Json(client))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state.client_service.delete(id).await?;
    state.cache.invalidate_client(id).await?;
    Ok(NoContent)
}
