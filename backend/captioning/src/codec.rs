//! Extraction and decoding of caption metadata from model replies.
//!
//! Vision models rarely return bare JSON: replies wrap the payload in prose
//! or a markdown code fence. [`extract_json`] slices the reply with a marker
//! heuristic; [`decode`] turns the slice into a [`CaptionRecord`].

use picshelf_core::{CaptionRecord, GalleryError};

/// Opening marker: payload starts after the first literal `json`.
const OPEN_MARKER: &str = "json";

/// Closing marker: a markdown fence ends the payload when one follows.
const CLOSE_MARKER: &str = "```";

/// Locate the JSON object inside a free-form caption reply.
///
/// Policy, case-sensitive and best-effort:
/// - take everything after the first `json` up to the next ``` fence;
/// - with no closing fence, take the rest of the reply;
/// - with no `json` marker at all, take the whole reply.
///
/// Fails with `MalformedCaption` when the located slice is not valid JSON.
/// A reply that mentions "json" in prose ahead of the real payload will slice
/// the prose and fail here; that is the accepted limit of the heuristic.
pub fn extract_json(raw: &str) -> Result<&str, GalleryError> {
    let slice = locate_payload(raw);
    if let Err(e) = serde_json::from_str::<serde_json::Value>(slice) {
        return Err(GalleryError::MalformedCaption(format!(
            "extracted text is not JSON: {e}"
        )));
    }
    Ok(slice)
}

fn locate_payload(raw: &str) -> &str {
    match raw.find(OPEN_MARKER) {
        Some(at) => {
            let rest = &raw[at + OPEN_MARKER.len()..];
            match rest.find(CLOSE_MARKER) {
                Some(end) => rest[..end].trim(),
                None => rest.trim(),
            }
        }
        None => raw.trim(),
    }
}

/// Decode extracted JSON into a caption record.
///
/// Missing `title`/`description` keys fall back to the sentinel strings;
/// input that is not a JSON object fails with `MalformedCaption`.
pub fn decode(json_text: &str) -> Result<CaptionRecord, GalleryError> {
    serde_json::from_str(json_text).map_err(|e| {
        GalleryError::MalformedCaption(format!("caption JSON did not decode: {e}"))
    })
}
