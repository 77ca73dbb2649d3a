pub mod models;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::ApiError;

static DB_POOL: OnceCell<Arc<SqlitePool>> = OnceCell::const_new();

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/portfolio.db".to_string()),
            max_connections: std::env::var("DB_POOL_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            acquire_timeout_secs: std::env::var("DB_ACQUIRE_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            idle_timeout_secs: std::env::var("DB_IDLE_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
        }
    }
}

pub async fn init_pool(config: Option<DbConfig>) -> Result<Arc<SqlitePool>, sqlx::Error> {
    let config = config.unwrap_or_default();

    tracing::info!("Initializing database connection pool...");
    tracing::debug!("Database URL: {}", config.url);

    // The default URL points inside data/; make sure the directory exists
    // before SQLite tries to create the file.
    if config.url.contains("data/") {
        std::fs::create_dir_all("data").ok();
    }

    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
        .connect_with(options)
        .await?;

    sqlx::query("SELECT 1").fetch_one(&pool).await?;

    tracing::info!("Database connection pool initialized successfully");

    let pool = Arc::new(pool);
    let _ = DB_POOL.set(pool.clone());

    Ok(pool)
}

pub fn get_pool() -> Option<Arc<SqlitePool>> {
    DB_POOL.get().cloned()
}

/// Pool accessor for request handlers; absence is a 503, not a panic.
pub fn require_pool() -> Result<Arc<SqlitePool>, ApiError> {
    get_pool().ok_or(ApiError::Unavailable)
}

pub async fn health_check() -> Result<std::time::Duration, sqlx::Error> {
    let pool = get_pool().ok_or(sqlx::Error::PoolClosed)?;

    let start = std::time::Instant::now();
    sqlx::query("SELECT 1").fetch_one(pool.as_ref()).await?;

    Ok(start.elapsed())
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            title TEXT,
            content TEXT,
            custom_html TEXT,
            custom_css TEXT,
            custom_js TEXT,
            is_visible BOOLEAN NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL DEFAULT 0,
            settings TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
    "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sections_sort_order
            ON sections(sort_order, id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS site_settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            key TEXT UNIQUE NOT NULL,
            value TEXT,
            updated_at TEXT NOT NULL
        )
    "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS media (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL,
            original_name TEXT NOT NULL,
            mime_type TEXT NOT NULL,
            size INTEGER NOT NULL,
            path TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
    "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed successfully");

    Ok(())
}

/// Insert the starter sections and site settings on a fresh database so a
/// new install renders a working page before the first admin edit.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<(), ApiError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sections")
        .fetch_one(pool)
        .await?;

    if count == 0 {
        let defaults = [
            (
                "hero",
                "hero",
                "Welcome to My Portfolio",
                serde_json::json!({
                    "subtitle": "Full Stack Developer & Designer",
                    "description": "I create beautiful and functional web applications.",
                    "buttonText": "View My Work",
                    "buttonLink": "#projects"
                }),
            ),
            (
                "about",
                "about",
                "About Me",
                serde_json::json!({
                    "description": "I am a passionate developer with experience in modern web technologies. I love creating solutions that make a difference.",
                    "skills": ["React", "Node.js", "JavaScript", "Python", "SQL"]
                }),
            ),
            (
                "projects",
                "projects",
                "My Projects",
                serde_json::json!({
                    "projects": [
                        {
                            "title": "Portfolio Builder",
                            "description": "A customizable portfolio website builder",
                            "technologies": ["React", "Rust", "SQLite"],
                            "image": "",
                            "link": "",
                            "github": ""
                        }
                    ]
                }),
            ),
            (
                "contact",
                "contact",
                "Get In Touch",
                serde_json::json!({
                    "description": "Feel free to reach out for collaborations or just a friendly hello!",
                    "email": "your.email@example.com",
                    "phone": "+1 (555) 123-4567",
                    "social": {
                        "github": "https://github.com/yourusername",
                        "linkedin": "https://linkedin.com/in/yourusername",
                        "twitter": "https://twitter.com/yourusername"
                    }
                }),
            ),
        ];

        let now = chrono::Utc::now();
        for (i, (name, kind, title, content)) in defaults.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sections
                    (name, type, title, content, custom_html, custom_css, custom_js,
                     is_visible, sort_order, settings, created_at, updated_at)
                VALUES (?, ?, ?, ?, '', '', '', 1, ?, '{}', ?, ?)
                "#,
            )
            .bind(name)
            .bind(kind)
            .bind(title)
            .bind(content.to_string())
            .bind(i as i64 + 1)
            .bind(now)
            .bind(now)
            .execute(pool)
            .await?;
        }
        tracing::info!("Default sections created");
    }

    let default_settings = [
        ("site_title", "My Portfolio"),
        ("site_description", "A customizable portfolio website"),
        ("theme", "light"),
        ("primary_color", "#3B82F6"),
        ("font_family", "Inter"),
    ];

    let now = chrono::Utc::now();
    for (key, value) in default_settings {
        sqlx::query(
            r#"
            INSERT INTO site_settings (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO NOTHING
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(pool)
        .await?;
    }
    tracing::info!("Default settings ensured");

    Ok(())
}

/// In-memory database for repository tests. Single connection because each
/// `sqlite::memory:` connection is its own separate database.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_config_default_uses_env_or_fallback() {
        let config = DbConfig::default();
        assert!(config.max_connections >= 1);
        assert!(config.acquire_timeout_secs >= 1);
        assert!(!config.url.is_empty());
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_defaults_populates_fresh_database() {
        let pool = test_pool().await;
        seed_defaults(&pool).await.unwrap();

        let (sections,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sections")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sections, 4);

        let (settings,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM site_settings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(settings, 5);

        // Seeding again must not duplicate anything.
        seed_defaults(&pool).await.unwrap();
        let (sections,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sections")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sections, 4);
    }
}
