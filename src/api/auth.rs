//! Bearer token extraction for authenticated endpoints.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use crate::error::ApiError;

/// Extracts the bearer token from the `Authorization` header.
///
/// # Errors
///
/// Returns [`ApiError::Unauthenticated`] when the header is missing,
/// malformed, or not a `Bearer` scheme.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::Unauthenticated)?;

    Ok(token)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(v) = HeaderValue::from_str(value) {
            headers.insert(AUTHORIZATION, v);
        }
        headers
    }

    #[test]
    fn extracts_the_token_after_the_bearer_scheme() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(bearer_token(&headers).ok(), Some("abc123"));
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let headers = HeaderMap::new();
        let result = bearer_token(&headers);
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }

    #[test]
    fn wrong_scheme_is_unauthenticated() {
        let headers = headers_with("Basic abc123");
        let result = bearer_token(&headers);
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }

    #[test]
    fn empty_token_is_unauthenticated() {
        let headers = headers_with("Bearer ");
        let result = bearer_token(&headers);
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }
}
