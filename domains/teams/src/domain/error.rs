//! Errors raised by team operations

use apicore_common::{Error, ErrorBody, RepositoryError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Failure of a teams service operation
#[derive(Debug, thiserror::Error)]
pub enum TeamsError {
    /// Another team already uses the identifier
    #[error("Identifier already exists")]
    IdentifierTaken,

    /// Unknown team, or a team the caller is not a member of
    #[error("Team not found")]
    TeamNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("User is already a member of this team")]
    UserAlreadyMember,

    #[error("User is not a member of this team")]
    UserNotMember,

    #[error(transparent)]
    Common(#[from] Error),
}

impl From<RepositoryError> for TeamsError {
    fn from(err: RepositoryError) -> Self {
        TeamsError::Common(err.into())
    }
}

impl TeamsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TeamsError::IdentifierTaken
            | TeamsError::UserAlreadyMember
            | TeamsError::UserNotMember => StatusCode::CONFLICT,
            TeamsError::TeamNotFound | TeamsError::UserNotFound => StatusCode::NOT_FOUND,
            TeamsError::Common(err) => err.status_code(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TeamsError::IdentifierTaken => "app_error",
            TeamsError::TeamNotFound => "not_found",
            TeamsError::UserNotFound => "user_not_found",
            TeamsError::UserAlreadyMember => "user_already_member",
            TeamsError::UserNotMember => "user_not_member",
            TeamsError::Common(err) => err.error_code(),
        }
    }
}

impl IntoResponse for TeamsError {
    fn into_response(self) -> Response {
        match self {
            TeamsError::Common(err) => err.into_response(),
            other => {
                let body = Json(ErrorBody::new(other.error_code(), other.to_string()));
                (other.status_code(), body).into_response()
            }
        }
    }
}
