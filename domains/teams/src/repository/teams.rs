//! Team repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::transactions::{
    create_membership_tx, create_team_tx, delete_memberships_for_team_tx, delete_team_tx,
};
use super::{RepoResult, TeamRepository};
use crate::domain::entities::{Membership, Team};
use apicore_common::RepositoryError;

#[derive(Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
}

impl PgTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn get_by_id(&self, team_id: Uuid) -> RepoResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, identifier, created_at, updated_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn get_by_identifier(&self, identifier: &str) -> RepoResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, identifier, created_at, updated_at
            FROM teams
            WHERE identifier = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn list_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT t.id, t.name, t.identifier, t.created_at, t.updated_at
            FROM teams t
            INNER JOIN team_users tu ON t.id = tu.team_id
            WHERE tu.user_id = $1
            ORDER BY t.name ASC, t.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    async fn count(&self) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create_with_owner(&self, team: &Team, owner_id: Uuid) -> RepoResult<Team> {
        let mut tx = self.pool.begin().await?;

        let created = create_team_tx(&mut tx, team).await?;
        create_membership_tx(&mut tx, &Membership::new(created.id, owner_id)).await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, team: &Team) -> RepoResult<Team> {
        let updated = sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET name = $2, identifier = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, name, identifier, created_at, updated_at
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(&team.identifier)
        .bind(team.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        updated.ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, team_id: Uuid) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        let removed = delete_memberships_for_team_tx(&mut tx, team_id).await?;
        delete_team_tx(&mut tx, team_id).await?;

        tx.commit().await?;
        tracing::debug!(team_id = %team_id, memberships = removed, "Team rows deleted");
        Ok(())
    }
}
