//! Teams domain state and auth backend integration

use apicore_auth::{AuthBackend, AuthConfig, AuthError, AuthIdentity, IdentityStore};
use async_trait::async_trait;
use axum::extract::FromRef;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::repository::{TeamsRepositories, UserRepository};
use crate::service::TeamsService;

pub use apicore_auth::AuthUser;

/// Application state for the Teams domain
#[derive(Clone)]
pub struct TeamsState {
    pub service: TeamsService,
    pub auth: AuthBackend,
}

impl TeamsState {
    /// Wire the service and an auth backend that resolves callers from the
    /// same user repository.
    pub fn new(repos: TeamsRepositories, auth_config: AuthConfig) -> Self {
        let identities = Arc::new(UserIdentities {
            users: repos.users.clone(),
        });

        Self {
            service: TeamsService::new(repos),
            auth: AuthBackend::new(auth_config, identities),
        }
    }
}

impl FromRef<TeamsState> for AuthBackend {
    fn from_ref(state: &TeamsState) -> Self {
        state.auth.clone()
    }
}

/// Caller lookup backed by the teams user table
struct UserIdentities {
    users: Arc<dyn UserRepository>,
}

#[async_trait]
impl IdentityStore for UserIdentities {
    async fn find_identity(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        let user = self.users.get_by_id(id).await.map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        Ok(user.map(AuthIdentity::from))
    }

    async fn provision_identity(
        &self,
        id: Uuid,
        email: Option<&str>,
    ) -> Result<AuthIdentity, AuthError> {
        let user = User::new(id, email.map(str::to_string), None);

        let stored = self.users.create_if_missing(&user).await.map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to provision user");
            AuthError::UserProvisionFailed
        })?;

        Ok(stored.into())
    }
}
