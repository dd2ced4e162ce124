//! MIME type detection for stored objects.
//!
//! Used when the store has no content type on record for an object.

use std::path::Path;

/// Detect MIME type by file extension.
pub fn detect_mime_type(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "json"         => "application/json",
        _              => "application/octet-stream",
    }
}

/// Whether a stored name counts as a gallery image.
pub fn is_jpeg_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".jpg") || lower.ends_with(".jpeg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_jpeg() {
        assert_eq!(detect_mime_type("photo.jpg"), "image/jpeg");
        assert_eq!(detect_mime_type("photo.JPEG"), "image/jpeg");
    }

    #[test]
    fn detects_sidecar_json() {
        assert_eq!(detect_mime_type("photo.json"), "application/json");
    }

    #[test]
    fn unknown_extension_fallback() {
        assert_eq!(detect_mime_type("file.xyz"), "application/octet-stream");
    }

    #[test]
    fn jpeg_name_check_is_case_insensitive() {
        assert!(is_jpeg_name("a.jpg"));
        assert!(is_jpeg_name("b.JPEG"));
        assert!(!is_jpeg_name("c.png"));
        assert!(!is_jpeg_name("d.json"));
    }
}
