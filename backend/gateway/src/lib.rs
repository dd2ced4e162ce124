//! PicShelf Gateway HTTP Server
//!
//! Serves the gallery and detail pages, accepts uploads, and streams raw
//! image bytes back out of the object store.

pub mod error;
pub mod handlers;
pub mod mime;
pub mod server;
pub mod service;
pub mod templates;

pub use server::{start_server, GatewayState};
pub use service::GalleryService;
