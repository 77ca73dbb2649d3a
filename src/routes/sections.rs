/**
 * Section Routes
 * Public listing plus admin CRUD and reorder endpoints
 */
use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::models::{NewSection, Section, SectionPatch};
use crate::error::ApiError;
use crate::routes::auth::require_admin;
use crate::{db, ordering, sections};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for PUT /api/admin/sections/reorder: the full id sequence
/// in desired top-to-bottom order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub sections: Vec<ReorderEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderEntry {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/sections - visible sections for the public page
pub async fn list_sections() -> Result<Json<Vec<Section>>, ApiError> {
    let pool = db::require_pool()?;
    Ok(Json(sections::list_public(&pool).await?))
}

/// GET /api/admin/sections - all sections including hidden (auth required)
pub async fn list_admin_sections(headers: HeaderMap) -> Result<Json<Vec<Section>>, ApiError> {
    require_admin(&headers)?;
    let pool = db::require_pool()?;
    Ok(Json(sections::list_all(&pool).await?))
}

/// GET /api/sections/{id} - single section
pub async fn get_section(Path(id): Path<i64>) -> Result<Json<Section>, ApiError> {
    let pool = db::require_pool()?;
    Ok(Json(sections::get(&pool, id).await?))
}

/// POST /api/admin/sections - create section (auth required)
pub async fn create_section(
    headers: HeaderMap,
    Json(payload): Json<NewSection>,
) -> Result<(StatusCode, Json<Section>), ApiError> {
    require_admin(&headers)?;
    let pool = db::require_pool()?;
    let section = sections::create(&pool, payload).await?;
    tracing::info!(section_id = section.id, "section created");
    Ok((StatusCode::CREATED, Json(section)))
}

/// PUT /api/admin/sections/{id} - partial update (auth required)
pub async fn update_section(
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<SectionPatch>,
) -> Result<Json<Section>, ApiError> {
    require_admin(&headers)?;
    let pool = db::require_pool()?;
    Ok(Json(sections::update(&pool, id, payload).await?))
}

/// DELETE /api/admin/sections/{id} - delete section (auth required)
pub async fn delete_section(
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    require_admin(&headers)?;
    let pool = db::require_pool()?;
    sections::delete(&pool, id).await?;
    tracing::info!(section_id = id, "section deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// PUT /api/admin/sections/reorder - whole-batch reorder (auth required)
pub async fn reorder_sections(
    headers: HeaderMap,
    Json(payload): Json<ReorderRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    require_admin(&headers)?;
    let pool = db::require_pool()?;
    let ids: Vec<i64> = payload.sections.iter().map(|e| e.id).collect();
    ordering::reorder(&pool, &ids).await?;
    Ok(Json(SuccessResponse { success: true }))
}
