//! Membership repository over the `team_users` association table

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{MembershipRepository, RepoResult};
use crate::domain::entities::Membership;
use apicore_common::RepositoryError;

#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    async fn exists(&self, team_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM team_users WHERE team_id = $1 AND user_id = $2)",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, membership: &Membership) -> RepoResult<Membership> {
        let created = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO team_users (team_id, user_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING team_id, user_id, created_at
            "#,
        )
        .bind(membership.team_id)
        .bind(membership.user_id)
        .bind(membership.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(created)
    }

    async fn delete(&self, team_id: Uuid, user_id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM team_users WHERE team_id = $1 AND user_id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count_for_user(&self, user_id: Uuid) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team_users WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_for_team(&self, team_id: Uuid) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team_users WHERE team_id = $1")
            .bind(team_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
