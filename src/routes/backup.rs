/**
 * Backup Routes
 * Snapshot export (download) and destructive full-replace import
 */
use axum::{
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::backup;
use crate::db;
use crate::error::ApiError;
use crate::routes::auth::require_admin;
use crate::routes::sections::SuccessResponse;

/// GET /api/admin/export - download the full dataset (auth required)
pub async fn export_snapshot(headers: HeaderMap) -> Result<impl IntoResponse, ApiError> {
    require_admin(&headers)?;
    let pool = db::require_pool()?;
    let snapshot = backup::export(&pool).await?;

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"portfolio-backup.json\"",
        )],
        Json(snapshot),
    ))
}

/// POST /api/admin/import - replace the dataset with a snapshot
/// (auth required)
pub async fn import_snapshot(
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Json<SuccessResponse>, ApiError> {
    require_admin(&headers)?;
    let pool = db::require_pool()?;
    backup::import(&pool, payload).await?;
    tracing::info!("snapshot imported");
    Ok(Json(SuccessResponse { success: true }))
}
