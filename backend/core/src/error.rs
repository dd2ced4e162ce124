use thiserror::Error;

/// Errors surfaced by the object store.
///
/// Every store call is an independent remote operation; any of them can fail
/// with `Backend` when the storage service is unreachable or rejects the call.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Top-level error type for gallery request handling.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("caption backend error ({provider}): {message}")]
    CaptionBackend { provider: String, message: String },

    #[error("malformed caption response: {0}")]
    MalformedCaption(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl GalleryError {
    /// Whether this error maps to a missing object rather than a backend fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GalleryError::Storage(StorageError::NotFound(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_converts_transparently() {
        let err: GalleryError = StorageError::NotFound("photo.jpg".to_string()).into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "object not found: photo.jpg");
    }

    #[test]
    fn caption_backend_error_names_provider() {
        let err = GalleryError::CaptionBackend {
            provider: "gemini".to_string(),
            message: "HTTP 503".to_string(),
        };
        assert_eq!(err.to_string(), "caption backend error (gemini): HTTP 503");
    }
}
