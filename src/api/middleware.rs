//! API Middleware
//!
//! Bearer authentication and request logging.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::AccountKind;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity taken from a validated bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub account_type: AccountKind,
    /// The raw token, needed to revoke it at logout
    pub token: String,
}

// =========================================================================
// Bearer Authentication Middleware
// =========================================================================

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The header must be exactly two space-separated parts.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AppError::MissingAuthorization)?
        .to_str()
        .map_err(|_| AppError::InvalidAuthorizationHeader)?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(token),
        _ => Err(AppError::InvalidAuthorizationHeader),
    }
}

/// Validate the bearer token and store the caller in request extensions
pub async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(request.headers())
        .map_err(IntoResponse::into_response)?
        .to_string();

    let claims = state
        .credentials
        .validate(&token)
        .map_err(|e| AppError::from(e).into_response())?;

    request.extensions_mut().insert(AuthenticatedUser {
        username: claims.username,
        account_type: claims.account_type,
        token,
    });

    Ok(next.run(request).await)
}

// =========================================================================
// mask_headers_for_logging
// =========================================================================

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            let masked_value = if SENSITIVE_HEADERS.contains(&name_lower.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    let headers = mask_headers_for_logging(request.headers());

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        version = ?version,
        headers = ?headers,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth.parse().unwrap());
        headers
    }

    #[test]
    fn test_mask_headers_for_logging() {
        let mut headers = headers_with("Bearer abc.def.ghi");
        headers.insert("content-type", "application/json".parse().unwrap());

        let masked = mask_headers_for_logging(&headers);

        let auth = masked.iter().find(|(k, _)| k == "authorization");
        let content_type = masked.iter().find(|(k, _)| k == "content-type");

        assert_eq!(auth.unwrap().1, "[REDACTED]");
        assert_eq!(content_type.unwrap().1, "application/json");
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers_with("Bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_extract_bearer_rejects_malformed_headers() {
        assert!(matches!(
            extract_bearer(&HeaderMap::new()),
            Err(AppError::MissingAuthorization)
        ));

        for bad in ["abc", "Basic abc", "Bearer", "Bearer ", "Bearer a b", "bearer abc"] {
            assert!(
                matches!(
                    extract_bearer(&headers_with(bad)),
                    Err(AppError::InvalidAuthorizationHeader)
                ),
                "accepted {:?}",
                bad
            );
        }
    }
}
