//! Database Models - structs representing database tables (used by sqlx/serde).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Raw section row as stored. `content` and `settings` are opaque JSON text
/// at this layer; the repository deserializes them on every read.
#[derive(Debug, Clone, FromRow)]
pub struct SectionRow {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub custom_html: Option<String>,
    pub custom_css: Option<String>,
    pub custom_js: Option<String>,
    pub is_visible: bool,
    pub sort_order: i64,
    pub settings: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully materialized section with structured content/settings, as served
/// to the admin dashboard and the public page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: Value,
    pub custom_html: String,
    pub custom_css: String,
    pub custom_js: String,
    pub is_visible: bool,
    pub sort_order: i64,
    pub settings: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Section creation payload. `name` and `kind` are required non-empty;
/// everything else falls back to the documented defaults. Both required
/// fields default at the serde layer so an omitted field reaches the
/// repository's validation instead of failing body extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSection {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub content: Option<Value>,
    pub custom_html: Option<String>,
    pub custom_css: Option<String>,
    pub custom_js: Option<String>,
    pub is_visible: Option<bool>,
    pub settings: Option<Value>,
}

/// Partial section update. Fields left as `None` keep their stored value;
/// `content` and `settings` are replaced wholesale when present, never
/// deep-merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub content: Option<Value>,
    pub custom_html: Option<String>,
    pub custom_css: Option<String>,
    pub custom_js: Option<String>,
    pub is_visible: Option<bool>,
    pub settings: Option<Value>,
}

/// Site setting row
#[derive(Debug, Clone, FromRow)]
pub struct SiteSettingRow {
    pub key: String,
    pub value: Option<String>,
}
