//! Shared utilities, configuration, and error handling for ApiCore
//!
//! This crate provides common functionality used across the ApiCore services:
//! - Configuration management following 12-factor principles
//! - Error types and their JSON rendering
//! - Request extractors and response helpers

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod response;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{ValidatedJson, ValidatedPath};
pub use response::{json_utf8, ErrorBody, StatusResponse, JSON_UTF8};
