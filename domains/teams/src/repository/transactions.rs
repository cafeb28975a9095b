//! Transactional free functions for the Teams domain (Zero2Prod pattern)

use crate::domain::entities::{Membership, Team};
use apicore_common::RepositoryError;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Insert a team within an existing transaction.
///
/// Returns `RepositoryError::AlreadyExists` when the identifier is taken.
pub async fn create_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team: &Team,
) -> std::result::Result<Team, RepositoryError> {
    sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (id, name, identifier, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, identifier, created_at, updated_at
        "#,
    )
    .bind(team.id)
    .bind(&team.name)
    .bind(&team.identifier)
    .bind(team.created_at)
    .bind(team.updated_at)
    .fetch_one(&mut **transaction)
    .await
    .map_err(RepositoryError::from_write)
}

/// Create a membership within an existing transaction.
pub async fn create_membership_tx(
    transaction: &mut Transaction<'_, Postgres>,
    membership: &Membership,
) -> std::result::Result<Membership, RepositoryError> {
    sqlx::query_as::<_, Membership>(
        r#"
        INSERT INTO team_users (team_id, user_id, created_at)
        VALUES ($1, $2, $3)
        RETURNING team_id, user_id, created_at
        "#,
    )
    .bind(membership.team_id)
    .bind(membership.user_id)
    .bind(membership.created_at)
    .fetch_one(&mut **transaction)
    .await
    .map_err(RepositoryError::from_write)
}

/// Delete every membership row of a team. Returns the number of rows removed.
pub async fn delete_memberships_for_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> std::result::Result<u64, RepositoryError> {
    let result = sqlx::query("DELETE FROM team_users WHERE team_id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;
    Ok(result.rows_affected())
}

/// Delete a team within an existing transaction.
///
/// Returns `RepositoryError::NotFound` if no row was deleted.
pub async fn delete_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> std::result::Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
