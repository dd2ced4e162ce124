//! Route handlers for the gallery surface.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use maud::Markup;
use picshelf_core::GalleryError;
use tracing::warn;

use crate::error::WebError;
use crate::mime;
use crate::server::GatewayState;
use crate::templates;

/// Multipart field name the upload form submits the file under.
pub const UPLOAD_FIELD: &str = "form_file";

/// GET /: gallery page with the upload form and one link per image.
pub async fn gallery_page(State(state): State<GatewayState>) -> Result<Markup, WebError> {
    let names = state.service.list_gallery().await?;
    Ok(templates::gallery_page(&names))
}

/// POST /upload: store the submitted image, caption it, then redirect to
/// its detail page.
pub async fn upload_image(
    State(state): State<GatewayState>,
    mut multipart: Multipart,
) -> Result<Response, WebError> {
    let mut upload: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GalleryError::BadRequest(format!("multipart error: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or("").to_string();
        let content_type = field.content_type().map(|c| c.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| GalleryError::BadRequest(format!("failed to read upload: {e}")))?;
        upload = Some((name, content_type, bytes));
        break;
    }

    let (name, content_type, bytes) = upload.ok_or_else(|| {
        GalleryError::BadRequest(format!("missing multipart field `{UPLOAD_FIELD}`"))
    })?;

    if is_suspicious_name(&name) {
        warn!(filename = %name, "rejected suspicious upload filename");
        return Err(GalleryError::BadRequest("invalid filename".to_string()).into());
    }
    if bytes.is_empty() {
        return Err(GalleryError::BadRequest("uploaded file is empty".to_string()).into());
    }

    let content_type =
        content_type.unwrap_or_else(|| mime::detect_mime_type(&name).to_string());
    state.service.accept_upload(&name, &content_type, bytes).await?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, format!("/files/{name}"))],
    )
        .into_response())
}

/// GET /files/{name}: detail page. Renders for any plausible name; missing
/// or broken caption records show up as sentinel text.
pub async fn detail_page(
    Path(name): Path<String>,
    State(state): State<GatewayState>,
) -> Result<Markup, WebError> {
    if is_suspicious_name(&name) {
        warn!(filename = %name, "rejected suspicious detail path");
        return Err(GalleryError::BadRequest("invalid filename".to_string()).into());
    }

    let record = state.service.image_detail(&name).await;
    Ok(templates::detail_page(&name, &record))
}

/// GET /image/{name}: raw image bytes with the stored content type.
pub async fn raw_image(
    Path(name): Path<String>,
    State(state): State<GatewayState>,
) -> Result<Response, WebError> {
    if is_suspicious_name(&name) {
        warn!(filename = %name, "rejected suspicious image path");
        return Err(GalleryError::BadRequest("invalid filename".to_string()).into());
    }

    let object = state.service.raw_image(&name).await?;
    let mime = object
        .content_type
        .clone()
        .unwrap_or_else(|| mime::detect_mime_type(&name).to_string());

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, mime)], object.bytes).into_response())
}

/// Basic path sanitization: reject traversal and empty names.
fn is_suspicious_name(name: &str) -> bool {
    name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_names_are_suspicious() {
        assert!(is_suspicious_name(""));
        assert!(is_suspicious_name("../etc/passwd"));
        assert!(is_suspicious_name("a/b.jpg"));
        assert!(is_suspicious_name("a\\b.jpg"));
        assert!(!is_suspicious_name("pier.jpg"));
        assert!(!is_suspicious_name("pier (1).jpg"));
    }
}
