//! Main HTTP gallery server.

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::handlers;
use crate::service::GalleryService;

/// Uploads are buffered in memory, so cap request bodies well above any
/// sensible photo size instead of the framework's small default.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub service: Arc<GalleryService>,
}

/// Build the gallery router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::gallery_page))
        .route("/upload", post(handlers::upload_image))
        .route("/files/:name", get(handlers::detail_page))
        .route("/image/:name", get(handlers::raw_image))
        .route("/api/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Starts the main Axum HTTP server for the gallery.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = router(state);

    info!("Gallery HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
