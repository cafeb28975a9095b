//! In-memory store implementing every Teams repository
//!
//! All tables live behind a single lock, so each repository call observes
//! and leaves a consistent state (the same guarantee a transaction gives the
//! Postgres implementation).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{MembershipRepository, RepoResult, TeamRepository, UserRepository};
use crate::domain::entities::{Membership, Team, User};
use apicore_common::RepositoryError;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    teams: HashMap<Uuid, Team>,
    /// Keyed by (team_id, user_id)
    memberships: HashMap<(Uuid, Uuid), Membership>,
}

impl Tables {
    fn identifier_taken(&self, identifier: &str, except: Option<Uuid>) -> bool {
        self.teams
            .values()
            .any(|team| team.identifier == identifier && Some(team.id) != except)
    }
}

/// Shared in-memory store; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn get_by_id(&self, team_id: Uuid) -> RepoResult<Option<Team>> {
        let tables = self.tables.read().await;
        Ok(tables.teams.get(&team_id).cloned())
    }

    async fn get_by_identifier(&self, identifier: &str) -> RepoResult<Option<Team>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teams
            .values()
            .find(|team| team.identifier == identifier)
            .cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Team>> {
        let tables = self.tables.read().await;

        let mut teams: Vec<Team> = tables
            .memberships
            .keys()
            .filter(|(_, member)| *member == user_id)
            .filter_map(|(team_id, _)| tables.teams.get(team_id).cloned())
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Ok(teams)
    }

    async fn count(&self) -> RepoResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.teams.len() as i64)
    }

    async fn create_with_owner(&self, team: &Team, owner_id: Uuid) -> RepoResult<Team> {
        let mut tables = self.tables.write().await;

        if tables.teams.contains_key(&team.id) || tables.identifier_taken(&team.identifier, None)
        {
            return Err(RepositoryError::AlreadyExists);
        }
        if !tables.users.contains_key(&owner_id) {
            return Err(RepositoryError::NotFound);
        }

        tables.teams.insert(team.id, team.clone());
        tables
            .memberships
            .insert((team.id, owner_id), Membership::new(team.id, owner_id));

        Ok(team.clone())
    }

    async fn update(&self, team: &Team) -> RepoResult<Team> {
        let mut tables = self.tables.write().await;

        if !tables.teams.contains_key(&team.id) {
            return Err(RepositoryError::NotFound);
        }
        if tables.identifier_taken(&team.identifier, Some(team.id)) {
            return Err(RepositoryError::AlreadyExists);
        }

        let stored = tables
            .teams
            .get_mut(&team.id)
            .ok_or(RepositoryError::NotFound)?;
        stored.name = team.name.clone();
        stored.identifier = team.identifier.clone();
        stored.updated_at = team.updated_at;

        Ok(stored.clone())
    }

    async fn delete(&self, team_id: Uuid) -> RepoResult<()> {
        let mut tables = self.tables.write().await;

        if tables.teams.remove(&team_id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        tables.memberships.retain(|(team, _), _| *team != team_id);

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_by_id(&self, user_id: Uuid) -> RepoResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&user_id).cloned())
    }

    async fn create_if_missing(&self, user: &User) -> RepoResult<User> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .users
            .entry(user.id)
            .or_insert_with(|| user.clone());
        Ok(stored.clone())
    }

    async fn list_by_team(&self, team_id: Uuid) -> RepoResult<Vec<User>> {
        let tables = self.tables.read().await;

        let mut memberships: Vec<&Membership> = tables
            .memberships
            .values()
            .filter(|membership| membership.team_id == team_id)
            .collect();
        memberships.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.user_id.cmp(&b.user_id))
        });

        Ok(memberships
            .into_iter()
            .filter_map(|membership| tables.users.get(&membership.user_id).cloned())
            .collect())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn exists(&self, team_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.memberships.contains_key(&(team_id, user_id)))
    }

    async fn create(&self, membership: &Membership) -> RepoResult<Membership> {
        let mut tables = self.tables.write().await;

        if !tables.teams.contains_key(&membership.team_id)
            || !tables.users.contains_key(&membership.user_id)
        {
            return Err(RepositoryError::NotFound);
        }

        let key = (membership.team_id, membership.user_id);
        if tables.memberships.contains_key(&key) {
            return Err(RepositoryError::AlreadyExists);
        }
        tables.memberships.insert(key, membership.clone());

        Ok(membership.clone())
    }

    async fn delete(&self, team_id: Uuid, user_id: Uuid) -> RepoResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .memberships
            .remove(&(team_id, user_id))
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn count_for_user(&self, user_id: Uuid) -> RepoResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .keys()
            .filter(|(_, member)| *member == user_id)
            .count() as i64)
    }

    async fn count_for_team(&self, team_id: Uuid) -> RepoResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .keys()
            .filter(|(team, _)| *team == team_id)
            .count() as i64)
    }
}
