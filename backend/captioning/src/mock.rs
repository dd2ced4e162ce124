//! Canned caption backend for tests and offline runs.

use async_trait::async_trait;
use picshelf_core::{CaptionBackend, GalleryError};

const DEFAULT_REPLY: &str =
    "```json\n{\"title\": \"Mock Title\", \"description\": \"Mock description.\"}\n```";

/// Caption backend that never leaves the process.
///
/// Returns a fixed reply (fenced JSON by default) or a configured failure,
/// so service tests can exercise both paths without a network.
#[derive(Debug, Clone, Default)]
pub struct MockCaptioner {
    reply: Option<String>,
    error: Option<String>,
}

impl MockCaptioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `reply` instead of the default fenced JSON.
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Fail every caption call with `message`.
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

#[async_trait]
impl CaptionBackend for MockCaptioner {
    fn name(&self) -> &str {
        "mock"
    }

    async fn caption(&self, _image: &[u8], _mime_type: &str) -> Result<String, GalleryError> {
        if let Some(message) = &self.error {
            return Err(GalleryError::CaptionBackend {
                provider: self.name().to_string(),
                message: message.clone(),
            });
        }
        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| DEFAULT_REPLY.to_string()))
    }
}
