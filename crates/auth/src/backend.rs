//! Concrete authentication backend
//!
//! Validates tokens with `AuthConfig` and resolves the caller through an
//! [`IdentityStore`] owned by the domain that persists users.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::claims::AccessClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::AuthIdentity;

/// Lookup and provisioning of callers.
///
/// Implementations log their own storage failures and report them as
/// `AuthError::UserLoadError` / `AuthError::UserProvisionFailed`.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_identity(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError>;

    /// Create the user row for a first-seen token subject. Must be idempotent.
    async fn provision_identity(
        &self,
        id: Uuid,
        email: Option<&str>,
    ) -> Result<AuthIdentity, AuthError>;
}

/// Authentication backend shared by every router state.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    config: AuthConfig,
    identities: Arc<dyn IdentityStore>,
}

impl AuthBackend {
    pub fn new(config: AuthConfig, identities: Arc<dyn IdentityStore>) -> Self {
        Self { config, identities }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Resolve the caller for a token subject, provisioning on first sight.
    async fn resolve_caller(
        &self,
        user_id: Uuid,
        claims: &AccessClaims,
    ) -> Result<AuthIdentity, AuthError> {
        if let Some(identity) = self.identities.find_identity(user_id).await? {
            return Ok(identity);
        }

        let identity = self
            .identities
            .provision_identity(user_id, claims.email.as_deref())
            .await?;
        tracing::info!(user_id = %user_id, "JIT user provisioned");

        Ok(identity)
    }

    /// Validate a bearer token and return the calling user.
    pub async fn authenticate_jwt(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        let claims = crate::jwt::validate_jwt_token(token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;

        self.resolve_caller(user_id, &claims).await
    }
}
