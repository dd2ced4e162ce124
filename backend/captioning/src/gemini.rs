//! Gemini vision captioner.
//!
//! Sends the image inline (base64) with a fixed instruction prompt and
//! returns the model's textual reply verbatim; structuring the reply is the
//! metadata codec's job.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use tracing::debug;

use picshelf_core::{CaptionBackend, GalleryError};

/// Instruction sent with every image.
const CAPTION_PROMPT: &str =
    "give the image a title and briefly describe the image, respond in JSON";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Caption client for the Gemini `generateContent` API.
pub struct GeminiCaptioner {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiCaptioner {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The API key rides in the query string; anything that echoes this URL
    /// into a log must go through `logging::redact` first.
    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn backend_error(&self, message: impl Into<String>) -> GalleryError {
        GalleryError::CaptionBackend {
            provider: self.name().to_string(),
            message: message.into(),
        }
    }
}

/// Pull the reply text out of a `generateContent` response body.
fn reply_text(reply: &serde_json::Value) -> Option<&str> {
    reply["candidates"][0]["content"]["parts"][0]["text"].as_str()
}

#[async_trait]
impl CaptionBackend for GeminiCaptioner {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn caption(&self, image: &[u8], mime_type: &str) -> Result<String, GalleryError> {
        let b64 = STANDARD.encode(image);
        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "text": CAPTION_PROMPT },
                { "inlineData": { "mimeType": mime_type, "data": b64 } }
            ]}]
        });

        debug!(model = %self.model, image_bytes = image.len(), "Requesting caption");

        let resp = self
            .client
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.backend_error(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(self.backend_error(format!("HTTP {status}: {detail}")));
        }

        let reply: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| self.backend_error(format!("unreadable response: {e}")))?;

        match reply_text(&reply) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(self.backend_error("reply carried no caption text")),
        }
    }
}
