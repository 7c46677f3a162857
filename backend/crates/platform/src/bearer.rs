//! Bearer token extraction
//!
//! Reads `Authorization: Bearer <token>` from request headers.

use axum::http::{HeaderMap, header};

/// Extract the bearer token from the `Authorization` header
///
/// Returns `None` when the header is missing, not valid UTF-8, uses a
/// different scheme, or carries an empty token. The scheme match is
/// case-insensitive (RFC 7235).
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}
