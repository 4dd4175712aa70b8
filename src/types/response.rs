use axum::{
    http::{header, HeaderValue, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::Paginated;

/// 201 with the created resource as body
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// 204 for DELETE endpoints
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> axum::response::Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// A page as JSON plus a `link` header pointing at its neighbours.
/// `uri` is the request URI the page was served for.
pub struct LinkedPage<T: Serialize> {
    pub page: Paginated<T>,
    pub uri: Uri,
}

impl<T: Serialize> LinkedPage<T> {
    pub fn new(page: Paginated<T>, uri: Uri) -> Self {
        Self { page, uri }
    }
}

impl<T: Serialize> IntoResponse for LinkedPage<T> {
    fn into_response(self) -> axum::response::Response {
        let links = self.page.link_header(&self.uri);
        let mut response = Json(self.page).into_response();
        if links.is_empty() {
            return response;
        }
        match HeaderValue::from_str(&links) {
            Ok(value) => {
                response.headers_mut().insert(header::LINK, value);
            }
            Err(e) => tracing::warn!("Skipping invalid link header: {}", e),
        }
        response
    }
}
