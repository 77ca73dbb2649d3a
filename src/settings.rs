/**
 * Site Settings Repository
 * Flat key/value configuration for the whole site; keys are created on
 * first write (upsert semantics), no fixed schema.
 */
use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::db::models::SiteSettingRow;
use crate::error::ApiError;

/// All settings as a flat string map.
pub async fn all(pool: &SqlitePool) -> Result<BTreeMap<String, String>, ApiError> {
    let rows = sqlx::query_as::<_, SiteSettingRow>("SELECT key, value FROM site_settings")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| (r.key, r.value.unwrap_or_default()))
        .collect())
}

/// Upsert every pair in the map; untouched keys keep their values.
pub async fn upsert(pool: &SqlitePool, values: &BTreeMap<String, String>) -> Result<(), ApiError> {
    let now = Utc::now();
    for (key, value) in values {
        sqlx::query(
            r#"
            INSERT INTO site_settings (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(pool)
        .await?;
    }
    Ok(())
}
