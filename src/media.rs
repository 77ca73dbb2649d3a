/**
 * Media Collaborator Interface
 * The repository only stores URL strings inside section content; actual
 * blob storage lives behind this interface and is out of the core.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;

/// Media file record, as tracked by the media table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: i64,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

/// Upload handed to a blob store.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Result of storing an upload; `url` is what content fields reference.
#[derive(Debug, Clone, Serialize)]
pub struct StoredMedia {
    pub id: i64,
    pub filename: String,
    pub url: String,
}

/// Opaque blob store capability consumed by the upload surface. The section
/// repository never calls this; it only persists the returned URLs verbatim.
pub trait MediaStore: Send + Sync {
    fn store(
        &self,
        upload: MediaUpload,
    ) -> impl std::future::Future<Output = Result<StoredMedia, ApiError>> + Send;
}
