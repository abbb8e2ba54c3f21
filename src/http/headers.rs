//! Header sanitization and rewriting for forwarded requests.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers (requests and relayed responses)
//! - Point `host` and `origin` at the backend
//! - Chain the client address onto `x-forwarded-for`
//!
//! Everything here works on copies; the inbound request is never touched.

use axum::http::header::{HOST, ORIGIN};
use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::routing::route::Backend;

/// Headers that only make sense for a single connection.
pub const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
];

pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Placeholder when no trusted client address is available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Copy `headers` without the hop-by-hop set.
///
/// Header names are stored lowercase, so removal is case-insensitive.
pub fn sanitize(headers: &HeaderMap) -> HeaderMap {
    let mut sanitized = headers.clone();
    strip_hop_by_hop(&mut sanitized);
    sanitized
}

/// Remove the hop-by-hop set in place. Used for relayed backend responses.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
}

/// Client address from the trusted upstream header, or `"unknown"`.
pub fn client_ip(headers: &HeaderMap, trusted_header: &HeaderName) -> String {
    headers
        .get(trusted_header)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

/// Apply backend-facing rewrites to already sanitized headers.
pub fn rewrite_for_backend(
    mut headers: HeaderMap,
    backend: &Backend,
    client_ip: &str,
) -> Result<HeaderMap, InvalidHeaderValue> {
    if !headers.contains_key(HOST) {
        headers.insert(HOST, HeaderValue::from_str(&backend.authority())?);
    }

    headers.insert(ORIGIN, HeaderValue::from_str(&backend.origin())?);

    let forwarded_for = forwarded_for(&headers, client_ip)?;
    headers.insert(X_FORWARDED_FOR, forwarded_for);

    Ok(headers)
}

/// Existing `x-forwarded-for` values, comma-joined, followed by `client_ip`.
fn forwarded_for(headers: &HeaderMap, client_ip: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut chain: Vec<u8> = Vec::new();
    for value in headers.get_all(&X_FORWARDED_FOR) {
        if !chain.is_empty() {
            chain.extend_from_slice(b", ");
        }
        chain.extend_from_slice(value.as_bytes());
    }

    if !chain.is_empty() {
        chain.extend_from_slice(b", ");
    }
    chain.extend_from_slice(client_ip.as_bytes());

    HeaderValue::from_bytes(&chain)
}
