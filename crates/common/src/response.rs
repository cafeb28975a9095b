//! Response bodies and header helpers shared by every router

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue},
    response::Response,
};
use serde::{Deserialize, Serialize};

/// Content type advertised on every JSON response
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Error body: `{"error": <code>, "description": <text>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub description: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            description: description.into(),
        }
    }
}

/// Success body for operations that have no resource to return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub code: String,
    pub description: String,
}

impl StatusResponse {
    /// `{"code": "ok", "description": <description>}`
    pub fn ok(description: impl Into<String>) -> Self {
        Self {
            code: "ok".to_string(),
            description: description.into(),
        }
    }
}

/// Response mapper that adds the utf-8 charset to plain JSON responses.
///
/// Install with `axum::middleware::map_response(json_utf8)`.
pub async fn json_utf8(mut response: Response) -> Response {
    let is_plain_json = response
        .headers()
        .get(CONTENT_TYPE)
        .is_some_and(|value| value == "application/json");

    if is_plain_json {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    }

    response
}
