//! Gallery orchestration over the object store and caption backend.
//!
//! All state lives in the object store; the service holds only client
//! handles and can be shared freely across requests.

use std::sync::Arc;

use bytes::Bytes;
use picshelf_captioning::codec;
use picshelf_core::{
    sidecar_key, CaptionBackend, CaptionRecord, GalleryError, ObjectStore, StorageError,
    StoredObject,
};
use tracing::{debug, info, warn};

use crate::mime::is_jpeg_name;

/// Orchestrates the four gallery operations: list, upload, detail, raw image.
///
/// Collaborators are injected so tests can run against in-memory fakes.
pub struct GalleryService {
    store: Arc<dyn ObjectStore>,
    captioner: Arc<dyn CaptionBackend>,
}

impl GalleryService {
    pub fn new(store: Arc<dyn ObjectStore>, captioner: Arc<dyn CaptionBackend>) -> Self {
        Self { store, captioner }
    }

    /// List gallery entries: JPEG names only, sorted for a stable page.
    pub async fn list_gallery(&self) -> Result<Vec<String>, GalleryError> {
        let mut names: Vec<String> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|name| is_jpeg_name(name))
            .collect();
        names.sort();
        debug!(count = names.len(), "listed gallery images");
        Ok(names)
    }

    /// Store an uploaded image, caption it, and persist the caption record.
    ///
    /// The image is written first; if captioning or the record write fails
    /// afterwards, the image stays in the store with no sidecar. There is no
    /// rollback, and the detail view already tolerates a missing record.
    pub async fn accept_upload(
        &self,
        name: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<CaptionRecord, GalleryError> {
        self.store.upload(name, bytes.clone(), content_type).await?;

        let reply = self.captioner.caption(&bytes, content_type).await?;
        let record = codec::decode(codec::extract_json(&reply)?)?;

        let body = serde_json::to_vec(&record)
            .map_err(|e| StorageError::Backend(format!("encode caption record: {e}")))?;
        self.store
            .upload(&sidecar_key(name), Bytes::from(body), "application/json")
            .await?;

        info!(
            name = %name,
            backend = self.captioner.name(),
            title = %record.title,
            "image uploaded and captioned"
        );
        Ok(record)
    }

    /// Fetch the caption record for the detail page.
    ///
    /// Degrades to sentinel title and description on any failure: a missing
    /// sidecar, an unreachable store, or a record that no longer parses.
    pub async fn image_detail(&self, name: &str) -> CaptionRecord {
        match self.load_record(name).await {
            Ok(record) => record,
            Err(err) => {
                warn!(name = %name, error = %err, "caption record unavailable, using sentinels");
                CaptionRecord::sentinel()
            }
        }
    }

    async fn load_record(&self, name: &str) -> Result<CaptionRecord, GalleryError> {
        let object = self.store.download(&sidecar_key(name)).await?;
        serde_json::from_slice(&object.bytes)
            .map_err(|e| GalleryError::MalformedCaption(format!("stored caption record: {e}")))
    }

    /// Fetch raw image bytes and their stored content type.
    pub async fn raw_image(&self, name: &str) -> Result<StoredObject, GalleryError> {
        Ok(self.store.download(name).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use picshelf_captioning::MockCaptioner;
    use picshelf_core::{NO_DESCRIPTION, NO_TITLE};
    use picshelf_storage::MemoryStore;

    fn service_over(store: Arc<MemoryStore>, captioner: MockCaptioner) -> GalleryService {
        GalleryService::new(store, Arc::new(captioner))
    }

    #[tokio::test]
    async fn upload_then_gallery_lists_the_name_once() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(store.clone(), MockCaptioner::new());

        service
            .accept_upload("pier.jpg", "image/jpeg", Bytes::from_static(b"jpeg"))
            .await
            .unwrap();

        let names = service.list_gallery().await.unwrap();
        assert_eq!(names, vec!["pier.jpg".to_string()]);
    }

    #[tokio::test]
    async fn gallery_filters_to_jpeg_names_and_sorts() {
        let store = Arc::new(MemoryStore::new());
        for name in ["zebra.JPG", "alley.jpeg", "notes.txt", "alley.json"] {
            store
                .upload(name, Bytes::from_static(b"x"), "application/octet-stream")
                .await
                .unwrap();
        }
        let service = service_over(store, MockCaptioner::new());

        let names = service.list_gallery().await.unwrap();
        assert_eq!(names, vec!["alley.jpeg".to_string(), "zebra.JPG".to_string()]);
    }

    #[tokio::test]
    async fn upload_persists_image_bytes_and_caption_sidecar() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(store.clone(), MockCaptioner::new());

        let payload = Bytes::from_static(b"\xff\xd8jpeg bytes");
        service
            .accept_upload("pier.jpg", "image/jpeg", payload.clone())
            .await
            .unwrap();

        let image = store.download("pier.jpg").await.unwrap();
        assert_eq!(image.bytes, payload);
        assert_eq!(image.content_type.as_deref(), Some("image/jpeg"));

        let sidecar = store.download("pier.json").await.unwrap();
        let record: CaptionRecord = serde_json::from_slice(&sidecar.bytes).unwrap();
        assert_eq!(record.title, "Mock Title");
        assert_eq!(sidecar.content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn detail_returns_the_stored_record() {
        let store = Arc::new(MemoryStore::new());
        let captioner = MockCaptioner::new().with_reply(
            "```json\n{\"title\": \"Sunset\", \"description\": \"Orange sky.\"}\n```",
        );
        let service = service_over(store, captioner);

        service
            .accept_upload("sunset.jpg", "image/jpeg", Bytes::from_static(b"jpeg"))
            .await
            .unwrap();

        let record = service.image_detail("sunset.jpg").await;
        assert_eq!(record.title, "Sunset");
        assert_eq!(record.description, "Orange sky.");
    }

    #[tokio::test]
    async fn detail_falls_back_to_sentinels_when_record_is_missing() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(store, MockCaptioner::new());

        let record = service.image_detail("never-uploaded.jpg").await;
        assert_eq!(record.title, NO_TITLE);
        assert_eq!(record.description, NO_DESCRIPTION);
    }

    #[tokio::test]
    async fn detail_falls_back_when_the_record_does_not_parse() {
        let store = Arc::new(MemoryStore::new());
        store
            .upload("pier.json", Bytes::from_static(b"not json"), "application/json")
            .await
            .unwrap();
        let service = service_over(store, MockCaptioner::new());

        let record = service.image_detail("pier.jpg").await;
        assert_eq!(record.title, NO_TITLE);
    }

    #[tokio::test]
    async fn caption_failure_aborts_the_upload_but_keeps_the_image() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(
            store.clone(),
            MockCaptioner::new().failing_with("quota exhausted"),
        );

        let err = service
            .accept_upload("pier.jpg", "image/jpeg", Bytes::from_static(b"jpeg"))
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::CaptionBackend { .. }));

        assert!(store.download("pier.jpg").await.is_ok());
        assert!(store.download("pier.json").await.is_err());
    }

    #[tokio::test]
    async fn unparseable_caption_reply_leaves_no_record_behind() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(
            store.clone(),
            MockCaptioner::new().with_reply("I cannot describe this image."),
        );

        let err = service
            .accept_upload("pier.jpg", "image/jpeg", Bytes::from_static(b"jpeg"))
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::MalformedCaption(_)));

        assert!(store.download("pier.jpg").await.is_ok());
        assert!(store.download("pier.json").await.is_err());

        // The image still renders a detail page, just with sentinels.
        let record = service.image_detail("pier.jpg").await;
        assert_eq!(record.title, NO_TITLE);
    }

    #[tokio::test]
    async fn raw_image_round_trips_and_missing_name_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(store, MockCaptioner::new());

        let payload = Bytes::from_static(b"\xff\xd8raw");
        service
            .accept_upload("alley.jpg", "image/jpeg", payload.clone())
            .await
            .unwrap();

        let object = service.raw_image("alley.jpg").await.unwrap();
        assert_eq!(object.bytes, payload);

        let err = service.raw_image("ghost.jpg").await.unwrap_err();
        assert!(err.is_not_found());
    }

    /// Store that accepts image writes but fails sidecar writes, for the
    /// caption-succeeded-record-write-failed path.
    struct SidecarRejectingStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl ObjectStore for SidecarRejectingStore {
        async fn list(&self) -> Result<Vec<String>, StorageError> {
            self.inner.list().await
        }

        async fn upload(
            &self,
            name: &str,
            bytes: Bytes,
            content_type: &str,
        ) -> Result<(), StorageError> {
            if name.ends_with(".json") {
                return Err(StorageError::Backend("write rejected".to_string()));
            }
            self.inner.upload(name, bytes, content_type).await
        }

        async fn download(&self, name: &str) -> Result<StoredObject, StorageError> {
            self.inner.download(name).await
        }
    }

    #[tokio::test]
    async fn record_write_failure_surfaces_as_storage_error() {
        let store = Arc::new(SidecarRejectingStore {
            inner: MemoryStore::new(),
        });
        let service = GalleryService::new(store.clone(), Arc::new(MockCaptioner::new()));

        let err = service
            .accept_upload("pier.jpg", "image/jpeg", Bytes::from_static(b"jpeg"))
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::Storage(_)));

        // Image landed before the record write failed.
        assert!(store.download("pier.jpg").await.is_ok());
    }
}
