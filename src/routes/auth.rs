/**
 * Admin Gate
 * Bearer-token verification for admin-only routes. Token issuance (login,
 * refresh, logout) is handled by the external auth service; this module
 * only decides whether a request carries a valid admin identity.
 */
use axum::http::HeaderMap;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

lazy_static::lazy_static! {
    /// JWT secret key from environment
    pub static ref JWT_SECRET: String = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "default-jwt-secret-change-in-production".to_string());
}

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,  // User ID
    pub role: String, // User role
    pub exp: i64,     // Expiry timestamp
    pub iat: i64,     // Issued at timestamp
}

/// Verify and decode an access token.
pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Gate an admin request: a valid bearer token or a typed rejection.
pub fn require_admin(headers: &HeaderMap) -> Result<Claims, ApiError> {
    let token =
        extract_bearer_token(headers).ok_or(ApiError::Unauthorized("Authorization required"))?;

    verify_access_token(token).map_err(|e| {
        tracing::debug!("rejected admin token: {}", e);
        ApiError::Unauthorized("Invalid or expired token")
    })
}

/// Mint a token signed with the configured secret, for router tests.
#[cfg(test)]
pub(crate) fn test_token(expired: bool) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = Utc::now();
    let exp = if expired {
        now - Duration::minutes(5)
    } else {
        now + Duration::minutes(15)
    };
    let claims = Claims {
        sub: "admin".to_string(),
        role: "admin".to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_verify_access_token_invalid_returns_err() {
        assert!(verify_access_token("invalid.jwt.token").is_err());
    }

    #[test]
    fn test_require_admin_without_header_is_unauthorized() {
        let headers = HeaderMap::new();
        let err = require_admin(&headers).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_require_admin_accepts_valid_bearer_token() {
        let mut headers = HeaderMap::new();
        let value = format!("Bearer {}", test_token(false));
        headers.insert("authorization", HeaderValue::from_str(&value).unwrap());
        let claims = require_admin(&headers).unwrap();
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn test_require_admin_rejects_expired_token() {
        let mut headers = HeaderMap::new();
        let value = format!("Bearer {}", test_token(true));
        headers.insert("authorization", HeaderValue::from_str(&value).unwrap());
        assert!(require_admin(&headers).is_err());
    }
}
