//! Teams service: every team operation, with the caller passed explicitly
//!
//! Visibility rule: a caller only sees teams they are a member of. Teams the
//! caller cannot see are reported as `TeamNotFound`, indistinguishable from
//! teams that do not exist.

use apicore_auth::AuthIdentity;
use apicore_common::{RepositoryError, StatusResponse};
use uuid::Uuid;

use crate::domain::entities::{Membership, Team, TeamChanges, User};
use crate::domain::error::TeamsError;
use crate::repository::TeamsRepositories;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, TeamsError>;

#[derive(Clone)]
pub struct TeamsService {
    repos: TeamsRepositories,
}

impl TeamsService {
    pub fn new(repos: TeamsRepositories) -> Self {
        Self { repos }
    }

    pub fn repositories(&self) -> &TeamsRepositories {
        &self.repos
    }

    /// Teams the caller is a member of
    pub async fn list(&self, caller: &AuthIdentity) -> Result<Vec<Team>> {
        let teams = self.repos.teams.list_by_user(caller.id).await?;
        tracing::debug!(user_id = %caller.id, count = teams.len(), "Listed teams");
        Ok(teams)
    }

    /// Create a team and link the caller to it in one unit of work
    pub async fn create(
        &self,
        caller: &AuthIdentity,
        name: String,
        identifier: Option<String>,
    ) -> Result<Team> {
        let team = Team::new(name, identifier)?;

        self.ensure_identifier_free(&team.identifier, None).await?;

        let created = self
            .repos
            .teams
            .create_with_owner(&team, caller.id)
            .await
            .map_err(|e| match e {
                RepositoryError::AlreadyExists => TeamsError::IdentifierTaken,
                other => other.into(),
            })?;

        tracing::info!(
            team_id = %created.id,
            identifier = %created.identifier,
            owner_id = %caller.id,
            "Team created"
        );
        Ok(created)
    }

    /// Report whether an identifier is still available
    pub async fn check_identifier(&self, identifier: &str) -> Result<StatusResponse> {
        self.ensure_identifier_free(identifier, None).await?;
        Ok(StatusResponse::ok("Identifier available"))
    }

    /// Fetch a team visible to the caller
    pub async fn get(&self, caller: &AuthIdentity, team_id: Uuid) -> Result<Team> {
        self.visible_team(caller, team_id).await
    }

    /// Rename a team. Used for both full (PUT) and partial (PATCH) updates;
    /// a PUT simply always carries a name.
    pub async fn update(
        &self,
        caller: &AuthIdentity,
        team_id: Uuid,
        changes: TeamChanges,
    ) -> Result<Team> {
        let mut team = self.visible_team(caller, team_id).await?;
        team.apply_changes(changes)?;

        self.ensure_identifier_free(&team.identifier, Some(team.id))
            .await?;

        let updated = self.repos.teams.update(&team).await.map_err(|e| match e {
            RepositoryError::AlreadyExists => TeamsError::IdentifierTaken,
            RepositoryError::NotFound => TeamsError::TeamNotFound,
            other => other.into(),
        })?;

        tracing::info!(
            team_id = %updated.id,
            identifier = %updated.identifier,
            user_id = %caller.id,
            "Team updated"
        );
        Ok(updated)
    }

    /// Delete a team together with all of its memberships.
    ///
    /// Only existence is checked; membership is not required.
    pub async fn delete(&self, caller: &AuthIdentity, team_id: Uuid) -> Result<()> {
        self.repos
            .teams
            .delete(team_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => TeamsError::TeamNotFound,
                other => other.into(),
            })?;

        tracing::info!(team_id = %team_id, user_id = %caller.id, "Team deleted");
        Ok(())
    }

    /// Users linked to a team visible to the caller
    pub async fn list_users(&self, caller: &AuthIdentity, team_id: Uuid) -> Result<Vec<User>> {
        let team = self.visible_team(caller, team_id).await?;
        Ok(self.repos.users.list_by_team(team.id).await?)
    }

    /// Link a user to a team visible to the caller
    pub async fn link_user(
        &self,
        caller: &AuthIdentity,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let team = self.visible_team(caller, team_id).await?;
        self.existing_user(user_id).await?;

        if self.repos.memberships.exists(team.id, user_id).await? {
            tracing::warn!(team_id = %team.id, user_id = %user_id, "User already linked");
            return Err(TeamsError::UserAlreadyMember);
        }

        self.repos
            .memberships
            .create(&Membership::new(team.id, user_id))
            .await
            .map_err(|e| match e {
                RepositoryError::AlreadyExists => TeamsError::UserAlreadyMember,
                RepositoryError::NotFound => TeamsError::UserNotFound,
                other => other.into(),
            })?;

        tracing::info!(team_id = %team.id, user_id = %user_id, by = %caller.id, "User linked");
        Ok(())
    }

    /// Unlink a user from a team visible to the caller
    pub async fn unlink_user(
        &self,
        caller: &AuthIdentity,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let team = self.visible_team(caller, team_id).await?;
        self.existing_user(user_id).await?;

        self.repos
            .memberships
            .delete(team.id, user_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => TeamsError::UserNotMember,
                other => other.into(),
            })?;

        tracing::info!(team_id = %team.id, user_id = %user_id, by = %caller.id, "User unlinked");
        Ok(())
    }

    async fn visible_team(&self, caller: &AuthIdentity, team_id: Uuid) -> Result<Team> {
        let team = self
            .repos
            .teams
            .get_by_id(team_id)
            .await?
            .ok_or(TeamsError::TeamNotFound)?;

        if !self.repos.memberships.exists(team.id, caller.id).await? {
            return Err(TeamsError::TeamNotFound);
        }

        Ok(team)
    }

    async fn existing_user(&self, user_id: Uuid) -> Result<User> {
        self.repos
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(TeamsError::UserNotFound)
    }

    /// `IdentifierTaken` unless the identifier is unused or used by `owner`
    async fn ensure_identifier_free(&self, identifier: &str, owner: Option<Uuid>) -> Result<()> {
        match self.repos.teams.get_by_identifier(identifier).await? {
            Some(existing) if Some(existing.id) != owner => {
                tracing::warn!(identifier = %identifier, "Identifier already exists");
                Err(TeamsError::IdentifierTaken)
            }
            _ => Ok(()),
        }
    }
}
