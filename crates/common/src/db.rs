//! Shared database types for ApiCore
//!
//! This module provides common database-related types used across domain repositories.

use crate::error::Error;
use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Classify a write failure: unique-constraint violations become
    /// `AlreadyExists`, foreign-key violations become `NotFound`.
    pub fn from_write(err: sqlx::Error) -> Self {
        let (unique, foreign_key) = match err.as_database_error() {
            Some(db_err) => (db_err.is_unique_violation(), db_err.is_foreign_key_violation()),
            None => (false, false),
        };

        if unique {
            RepositoryError::AlreadyExists
        } else if foreign_key {
            RepositoryError::NotFound
        } else {
            RepositoryError::Connection(err)
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::NotFound("Record not found".to_string()),
            RepositoryError::AlreadyExists => Error::Conflict("Record already exists".to_string()),
            RepositoryError::Connection(e) => Error::Database(e),
            RepositoryError::InvalidData(msg) => Error::Validation(msg),
        }
    }
}
