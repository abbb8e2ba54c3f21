//! Fixed responses produced by the gateway itself.
//!
//! Bodies are constant: internal errors never reach the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub const HEALTHY_BODY: &str = "healthy";
pub const NOT_FOUND_BODY: &str = "Not Found";
pub const BAD_GATEWAY_BODY: &str = "Bad Gateway";

pub fn healthy() -> Response {
    (StatusCode::OK, HEALTHY_BODY).into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

pub fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, BAD_GATEWAY_BODY).into_response()
}
