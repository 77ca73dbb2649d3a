/**
 * Settings Routes
 * Public read of site settings, admin upsert
 */
use axum::{http::HeaderMap, Json};
use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::routes::auth::require_admin;
use crate::routes::sections::SuccessResponse;
use crate::{db, settings};

/// GET /api/settings - flat key/value map for the public page
pub async fn get_settings() -> Result<Json<BTreeMap<String, String>>, ApiError> {
    let pool = db::require_pool()?;
    Ok(Json(settings::all(&pool).await?))
}

/// PUT /api/admin/settings - upsert submitted keys (auth required)
pub async fn update_settings(
    headers: HeaderMap,
    Json(payload): Json<BTreeMap<String, String>>,
) -> Result<Json<SuccessResponse>, ApiError> {
    require_admin(&headers)?;
    let pool = db::require_pool()?;
    settings::upsert(&pool, &payload).await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, put};
    use axum::Router;
    use tower::ServiceExt;

    fn test_router() -> Router {
        Router::new()
            .route("/api/settings", get(get_settings))
            .route("/api/admin/settings", put(update_settings))
    }

    #[tokio::test]
    async fn test_get_settings_without_pool_is_unavailable() {
        let req = Request::get("/api/settings").body(Body::empty()).unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_update_settings_without_token_is_unauthorized() {
        let req = Request::put("/api/admin/settings")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"theme":"dark"}"#))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
