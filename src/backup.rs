/**
 * Backup Codec
 * Whole-dataset snapshot export and destructive full-replace import.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::db::models::Section;
use crate::error::ApiError;
use crate::{sections, settings};

pub const SNAPSHOT_VERSION: &str = "1.0.0";

/// Portable serialization of the entire dataset (sections + settings).
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub sections: Vec<Section>,
    pub settings: BTreeMap<String, String>,
    pub exported_at: DateTime<Utc>,
    pub version: String,
}

/// Section as accepted from a snapshot. Ids and timestamps from the source
/// install are ignored; the store reassigns them on insert.
#[derive(Debug, Deserialize)]
struct SnapshotSection {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default = "empty_object")]
    content: Value,
    #[serde(default)]
    custom_html: String,
    #[serde(default)]
    custom_css: String,
    #[serde(default)]
    custom_js: String,
    #[serde(default = "default_true")]
    is_visible: bool,
    #[serde(default)]
    sort_order: i64,
    #[serde(default = "empty_object")]
    settings: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn default_true() -> bool {
    true
}

/// Read the full dataset into a snapshot. Pure read, no mutation.
pub async fn export(pool: &SqlitePool) -> Result<Snapshot, ApiError> {
    Ok(Snapshot {
        sections: sections::list_all(pool).await?,
        settings: settings::all(pool).await?,
        exported_at: Utc::now(),
        version: SNAPSHOT_VERSION.to_string(),
    })
}

/// Replace the entire dataset with the snapshot's contents.
///
/// Delete and reinsert run in one transaction, so readers never observe a
/// half-imported store and a failed import leaves the previous data intact.
/// Section ids are reassigned on insert; sort_order and is_visible carry
/// over verbatim.
pub async fn import(pool: &SqlitePool, data: Value) -> Result<(), ApiError> {
    let raw_sections = data
        .get("sections")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::InvalidFormat("missing sections list".to_string()))?;
    let raw_settings = data
        .get("settings")
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::InvalidFormat("missing settings mapping".to_string()))?;

    let imported: Vec<SnapshotSection> = raw_sections
        .iter()
        .map(|v| serde_json::from_value(v.clone()))
        .collect::<Result<_, _>>()
        .map_err(|e| ApiError::InvalidFormat(format!("bad section entry: {e}")))?;

    let mut tx = pool.begin().await?;
    let now = Utc::now();

    sqlx::query("DELETE FROM sections").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM site_settings")
        .execute(&mut *tx)
        .await?;

    for section in &imported {
        sqlx::query(
            r#"
            INSERT INTO sections
                (name, type, title, content, custom_html, custom_css, custom_js,
                 is_visible, sort_order, settings, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&section.name)
        .bind(&section.kind)
        .bind(&section.title)
        .bind(section.content.to_string())
        .bind(&section.custom_html)
        .bind(&section.custom_css)
        .bind(&section.custom_js)
        .bind(section.is_visible)
        .bind(section.sort_order)
        .bind(section.settings.to_string())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    for (key, value) in raw_settings {
        // Tolerate non-string values from foreign snapshots.
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        sqlx::query("INSERT INTO site_settings (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(now)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(
        "imported snapshot: {} sections, {} settings",
        imported.len(),
        raw_settings.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::NewSection;
    use crate::db::test_pool;
    use serde_json::json;

    async fn seed(pool: &SqlitePool) {
        for (name, kind, content) in [
            ("hero", "hero", json!({"subtitle": "hey"})),
            ("about", "about", json!({"skills": ["rust"]})),
        ] {
            sections::create(
                pool,
                NewSection {
                    name: name.to_string(),
                    kind: kind.to_string(),
                    content: Some(content),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }
        settings::upsert(
            pool,
            &[("site_title".to_string(), "Mine".to_string())]
                .into_iter()
                .collect(),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_export_carries_version_and_full_dataset() {
        let pool = test_pool().await;
        seed(&pool).await;

        let snap = export(&pool).await.unwrap();
        assert_eq!(snap.version, SNAPSHOT_VERSION);
        assert_eq!(snap.sections.len(), 2);
        assert_eq!(snap.settings.get("site_title").unwrap(), "Mine");
    }

    #[tokio::test]
    async fn test_import_of_export_round_trips_by_content() {
        let pool = test_pool().await;
        seed(&pool).await;

        let before = sections::list_all(&pool).await.unwrap();
        let snap = export(&pool).await.unwrap();

        // Mutate so the import visibly restores.
        sections::delete(&pool, before[0].id).await.unwrap();
        settings::upsert(
            &pool,
            &[("site_title".to_string(), "Wrecked".to_string())]
                .into_iter()
                .collect(),
        )
        .await
        .unwrap();

        import(&pool, serde_json::to_value(&snap).unwrap())
            .await
            .unwrap();

        let after = sections::list_all(&pool).await.unwrap();
        assert_eq!(after.len(), before.len());
        for (b, a) in before.iter().zip(after.iter()) {
            // Ids may be reassigned; compare observable content.
            assert_eq!(b.name, a.name);
            assert_eq!(b.kind, a.kind);
            assert_eq!(b.title, a.title);
            assert_eq!(b.content, a.content);
            assert_eq!(b.settings, a.settings);
            assert_eq!(b.sort_order, a.sort_order);
            assert_eq!(b.is_visible, a.is_visible);
        }

        let restored = settings::all(&pool).await.unwrap();
        assert_eq!(restored.get("site_title").unwrap(), "Mine");
    }

    #[tokio::test]
    async fn test_import_is_full_replace_not_merge() {
        let pool = test_pool().await;
        seed(&pool).await;

        let snap = json!({
            "sections": [
                {"name": "only", "type": "custom", "sort_order": 1}
            ],
            "settings": {"theme": "dark"}
        });
        import(&pool, snap).await.unwrap();

        let all = sections::list_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "only");
        assert_eq!(all[0].content, json!({}));
        assert!(all[0].is_visible);

        let s = settings::all(&pool).await.unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.get("theme").unwrap(), "dark");
    }

    #[tokio::test]
    async fn test_import_missing_top_level_keys_is_invalid_format() {
        let pool = test_pool().await;
        seed(&pool).await;

        let err = import(&pool, json!({"sections": []})).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidFormat(_)));

        let err = import(&pool, json!({"settings": {}})).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidFormat(_)));

        // A rejected snapshot must leave the store untouched.
        assert_eq!(sections::list_all(&pool).await.unwrap().len(), 2);
        assert_eq!(settings::all(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_bad_section_entry_rejected_before_any_write() {
        let pool = test_pool().await;
        seed(&pool).await;

        let snap = json!({
            "sections": [{"title": "no name or type"}],
            "settings": {}
        });
        let err = import(&pool, snap).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidFormat(_)));
        assert_eq!(sections::list_all(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_import_preserves_sort_order_and_visibility_verbatim() {
        let pool = test_pool().await;

        let snap = json!({
            "sections": [
                {"name": "b", "type": "about", "sort_order": 7, "is_visible": false},
                {"name": "a", "type": "hero", "sort_order": 2}
            ],
            "settings": {}
        });
        import(&pool, snap).await.unwrap();

        let all = sections::list_all(&pool).await.unwrap();
        assert_eq!(all.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(all[1].sort_order, 7);
        assert!(!all[1].is_visible);
    }
}
