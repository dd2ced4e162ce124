use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Sentinel title substituted when a caption record is absent or incomplete.
pub const NO_TITLE: &str = "No Title Found";

/// Sentinel description substituted when a caption record is absent or incomplete.
pub const NO_DESCRIPTION: &str = "No Description Found";

/// Generated title/description persisted as a JSON sidecar next to its image.
///
/// Creation is best-effort: an image without a record is a valid, handled
/// state, and missing fields deserialize to the sentinels instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionRecord {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_title() -> String {
    NO_TITLE.to_string()
}

fn default_description() -> String {
    NO_DESCRIPTION.to_string()
}

impl CaptionRecord {
    /// The record shown when no caption is stored for an image.
    pub fn sentinel() -> Self {
        Self {
            title: NO_TITLE.to_string(),
            description: NO_DESCRIPTION.to_string(),
        }
    }
}

/// Name of the JSON sidecar for an image: same base name, `.json` extension.
pub fn sidecar_key(image_name: &str) -> String {
    Path::new(image_name)
        .with_extension("json")
        .to_string_lossy()
        .into_owned()
}

/// An object fetched from the store: payload plus the content type it was
/// stored with, when the backend kept one.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}
