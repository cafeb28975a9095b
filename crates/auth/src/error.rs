//! Authentication errors

use apicore_common::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header required")]
    MissingAuthorization,
    #[error("Invalid authorization header format")]
    InvalidAuthorizationFormat,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid user ID in token")]
    InvalidUserId,
    #[error("Failed to load user")]
    UserLoadError,
    #[error("Failed to provision user")]
    UserProvisionFailed,
}

impl AuthError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::MissingAuthorization | AuthError::InvalidAuthorizationFormat => {
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            AuthError::InvalidToken | AuthError::InvalidUserId => {
                (StatusCode::UNAUTHORIZED, "invalid_token")
            }
            AuthError::UserLoadError | AuthError::UserProvisionFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = Json(ErrorBody::new(code, self.to_string()));

        (status, body).into_response()
    }
}
