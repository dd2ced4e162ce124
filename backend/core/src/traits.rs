use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{GalleryError, StorageError};
use crate::types::StoredObject;

/// Blob store holding images and their caption sidecars under a fixed prefix.
///
/// Each call is an independent remote operation with no transactional
/// guarantees; listing is not required to be consistent with concurrent writes.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List object names under the store's prefix, with the prefix stripped.
    async fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Write an object, overwriting any existing one of the same name.
    async fn upload(
        &self,
        name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Fetch an object's bytes and stored content type.
    async fn download(&self, name: &str) -> Result<StoredObject, StorageError>;
}

/// Remote captioning backend producing free-form descriptive text for an image.
#[async_trait]
pub trait CaptionBackend: Send + Sync {
    /// Backend name used in logs and error messages (e.g. "gemini").
    fn name(&self) -> &str;

    /// Caption an image, returning the backend's textual reply verbatim.
    ///
    /// The reply is not guaranteed to be structured; callers run it through
    /// the metadata codec to pull out title and description.
    async fn caption(&self, image: &[u8], mime_type: &str) -> Result<String, GalleryError>;
}
