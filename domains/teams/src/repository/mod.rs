//! Repository seams for the Teams domain
//!
//! Each repository is a trait with a Postgres implementation (runtime
//! `sqlx` queries) and a shared in-memory implementation used for local
//! runs and tests.

pub mod memberships;
pub mod memory;
pub mod teams;
pub mod transactions;
pub mod users;

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Membership, Team, User};
use apicore_common::RepositoryError;

pub use memberships::PgMembershipRepository;
pub use memory::InMemoryStore;
pub use teams::PgTeamRepository;
pub use transactions::{
    create_membership_tx, create_team_tx, delete_memberships_for_team_tx, delete_team_tx,
};
pub use users::PgUserRepository;

/// Repository result type
pub type RepoResult<T> = std::result::Result<T, RepositoryError>;

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn get_by_id(&self, team_id: Uuid) -> RepoResult<Option<Team>>;

    async fn get_by_identifier(&self, identifier: &str) -> RepoResult<Option<Team>>;

    /// Teams the user is a member of, ordered by name
    async fn list_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Team>>;

    async fn count(&self) -> RepoResult<i64>;

    /// Insert the team and its owner membership as one unit.
    ///
    /// `AlreadyExists` when the identifier is taken; nothing is written then.
    async fn create_with_owner(&self, team: &Team, owner_id: Uuid) -> RepoResult<Team>;

    /// Persist name and identifier. `NotFound` for an unknown team,
    /// `AlreadyExists` when the identifier belongs to another team.
    async fn update(&self, team: &Team) -> RepoResult<Team>;

    /// Remove the team and every membership row pointing at it
    async fn delete(&self, team_id: Uuid) -> RepoResult<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, user_id: Uuid) -> RepoResult<Option<User>>;

    /// Insert the user unless the id already exists; returns the stored row
    async fn create_if_missing(&self, user: &User) -> RepoResult<User>;

    /// Users linked to a team, in the order they joined
    async fn list_by_team(&self, team_id: Uuid) -> RepoResult<Vec<User>>;
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn exists(&self, team_id: Uuid, user_id: Uuid) -> RepoResult<bool>;

    /// `AlreadyExists` for a duplicate pair, `NotFound` for a dangling id
    async fn create(&self, membership: &Membership) -> RepoResult<Membership>;

    /// `NotFound` when the pair is not linked
    async fn delete(&self, team_id: Uuid, user_id: Uuid) -> RepoResult<()>;

    async fn count_for_user(&self, user_id: Uuid) -> RepoResult<i64>;

    async fn count_for_team(&self, team_id: Uuid) -> RepoResult<i64>;
}

/// Combined repository access for the Teams domain
#[derive(Clone)]
pub struct TeamsRepositories {
    pub users: Arc<dyn UserRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
}

impl TeamsRepositories {
    /// Repositories backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            teams: Arc::new(PgTeamRepository::new(pool.clone())),
            memberships: Arc::new(PgMembershipRepository::new(pool)),
        }
    }

    /// Repositories sharing one fresh in-memory store
    pub fn in_memory() -> Self {
        Self::from_store(InMemoryStore::new())
    }

    /// Repositories over an existing in-memory store
    pub fn from_store(store: InMemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            teams: Arc::new(store.clone()),
            memberships: Arc::new(store),
        }
    }
}
