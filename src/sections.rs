/**
 * Section Repository
 * CRUD and validation over the sections table; owns the content/settings
 * serialization boundary and default-value policy.
 */
use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::SqlitePool;

use crate::db::models::{NewSection, Section, SectionPatch, SectionRow};
use crate::error::ApiError;

/// Deserialize a stored content/settings blob.
///
/// Absent (NULL or empty) blobs read back as an empty mapping; a blob that
/// is present but unparseable fails the read instead of being masked.
fn parse_payload(raw: Option<&str>, field: &'static str, id: i64) -> Result<Value, ApiError> {
    match raw {
        None => Ok(Value::Object(Map::new())),
        Some(s) if s.is_empty() => Ok(Value::Object(Map::new())),
        Some(s) => serde_json::from_str(s).map_err(|e| {
            tracing::error!("unparseable {} blob on section {}: {}", field, id, e);
            ApiError::CorruptData { field, id }
        }),
    }
}

/// Turn a raw row into a materialized section, deserializing both blobs.
fn materialize(row: SectionRow) -> Result<Section, ApiError> {
    let content = parse_payload(row.content.as_deref(), "content", row.id)?;
    let settings = parse_payload(row.settings.as_deref(), "settings", row.id)?;

    Ok(Section {
        id: row.id,
        name: row.name,
        kind: row.kind,
        title: row.title.unwrap_or_default(),
        content,
        custom_html: row.custom_html.unwrap_or_default(),
        custom_css: row.custom_css.unwrap_or_default(),
        custom_js: row.custom_js.unwrap_or_default(),
        is_visible: row.is_visible,
        sort_order: row.sort_order,
        settings,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

const SELECT_COLUMNS: &str = "id, name, type, title, content, custom_html, custom_css, \
                              custom_js, is_visible, sort_order, settings, created_at, updated_at";

/// Visible sections in display order, for the public page.
pub async fn list_public(pool: &SqlitePool) -> Result<Vec<Section>, ApiError> {
    let rows = sqlx::query_as::<_, SectionRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM sections WHERE is_visible = 1 ORDER BY sort_order ASC, id ASC"
    ))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(materialize).collect()
}

/// Every section regardless of visibility, for the admin dashboard.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Section>, ApiError> {
    let rows = sqlx::query_as::<_, SectionRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM sections ORDER BY sort_order ASC, id ASC"
    ))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(materialize).collect()
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Section, ApiError> {
    let row = sqlx::query_as::<_, SectionRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM sections WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::NotFound("Section"))?;

    materialize(row)
}

/// Create a section, appended at the end of the current order.
pub async fn create(pool: &SqlitePool, new: NewSection) -> Result<Section, ApiError> {
    if new.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    if new.kind.trim().is_empty() {
        return Err(ApiError::Validation("type is required".to_string()));
    }

    let (max_order,): (Option<i64>,) = sqlx::query_as("SELECT MAX(sort_order) FROM sections")
        .fetch_one(pool)
        .await?;
    let sort_order = max_order.unwrap_or(0) + 1;

    let content = new.content.unwrap_or_else(|| Value::Object(Map::new()));
    let settings = new.settings.unwrap_or_else(|| Value::Object(Map::new()));
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO sections
            (name, type, title, content, custom_html, custom_css, custom_js,
             is_visible, sort_order, settings, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new.name)
    .bind(&new.kind)
    .bind(new.title.unwrap_or_default())
    .bind(content.to_string())
    .bind(new.custom_html.unwrap_or_default())
    .bind(new.custom_css.unwrap_or_default())
    .bind(new.custom_js.unwrap_or_default())
    .bind(new.is_visible.unwrap_or(true))
    .bind(sort_order)
    .bind(settings.to_string())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get(pool, result.last_insert_rowid()).await
}

/// Apply a partial update. Present fields replace stored values in full;
/// absent fields keep their previous value. `updated_at` always refreshes.
pub async fn update(pool: &SqlitePool, id: i64, patch: SectionPatch) -> Result<Section, ApiError> {
    let existing = get(pool, id).await?;

    let content = patch.content.unwrap_or(existing.content);
    let settings = patch.settings.unwrap_or(existing.settings);

    sqlx::query(
        r#"
        UPDATE sections SET
            name = ?, type = ?, title = ?, content = ?, custom_html = ?,
            custom_css = ?, custom_js = ?, is_visible = ?, settings = ?,
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(patch.name.unwrap_or(existing.name))
    .bind(patch.kind.unwrap_or(existing.kind))
    .bind(patch.title.unwrap_or(existing.title))
    .bind(content.to_string())
    .bind(patch.custom_html.unwrap_or(existing.custom_html))
    .bind(patch.custom_css.unwrap_or(existing.custom_css))
    .bind(patch.custom_js.unwrap_or(existing.custom_js))
    .bind(patch.is_visible.unwrap_or(existing.is_visible))
    .bind(settings.to_string())
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    get(pool, id).await
}

/// Delete one section. Remaining sort_order values are left untouched; a
/// gap persists until the next explicit reorder.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM sections WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Section"));
    }
    Ok(())
}
