use serde::Deserialize;

/// PicShelf runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Object store bucket holding images and caption sidecars
    pub bucket: String,
    /// Key prefix under which all gallery objects live
    pub prefix: String,
    /// Gemini API key; the server refuses to start without one
    pub gemini_api_key: Option<String>,
    /// Gemini model used for captioning
    pub gemini_model: String,
    /// Custom S3 endpoint for MinIO-style deployments
    pub s3_endpoint: Option<String>,
    /// Directory for rolling log files
    pub log_dir: Option<String>,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            bucket: "picshelf-images".to_string(),
            prefix: "images/".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".to_string(),
            s3_endpoint: None,
            log_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("PICSHELF_BIND")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PICSHELF_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            bucket: std::env::var("PICSHELF_BUCKET")
                .unwrap_or_else(|_| "picshelf-images".to_string()),
            prefix: std::env::var("PICSHELF_PREFIX")
                .unwrap_or_else(|_| "images/".to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            s3_endpoint: std::env::var("S3_ENDPOINT_URL").ok(),
            log_dir: std::env::var("PICSHELF_LOG_DIR").ok(),
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string()),
        }
    }
}
