//! HTTP error mapping for gateway handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use picshelf_core::{GalleryError, StorageError};
use tracing::error;

/// Handler-level error that renders as a plain-text HTTP response.
///
/// Clients get a status line and a short message; the full error chain goes
/// to the server log, scrubbed of credentials first since captioning errors
/// can embed the request URL.
#[derive(Debug)]
pub struct WebError(pub GalleryError);

impl From<GalleryError> for WebError {
    fn from(err: GalleryError) -> Self {
        Self(err)
    }
}

impl From<StorageError> for WebError {
    fn from(err: StorageError) -> Self {
        Self(GalleryError::Storage(err))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match &self.0 {
            GalleryError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {reason}")).into_response()
            }
            err if err.is_not_found() => {
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            err => {
                error!(
                    error = %logging::redact_credentials(&err.to_string()),
                    "request failed"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
