pub mod error;
pub mod traits;
pub mod types;

pub use error::{GalleryError, StorageError};
pub use traits::{CaptionBackend, ObjectStore};
pub use types::{sidecar_key, CaptionRecord, StoredObject, NO_DESCRIPTION, NO_TITLE};
