//! Authentication for the ApiCore API
//!
//! Validates bearer JWTs and resolves the calling user ("me") through an
//! [`IdentityStore`]. The [`AuthUser`] extractor works with any router state
//! implementing `FromRef<S>` for [`AuthBackend`].

mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod jwt;
mod types;

pub use backend::{AuthBackend, IdentityStore};
pub use claims::AccessClaims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use jwt::issue_token;
pub use types::AuthIdentity;
