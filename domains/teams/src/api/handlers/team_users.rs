//! Team membership handlers: list, link and unlink users

use apicore_common::{StatusResponse, ValidatedPath};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::middleware::{AuthUser, TeamsState};
use crate::domain::entities::User;
use crate::service::Result;

/// User representation inside a team listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// List users linked to a team
///
/// **GET /teams/{id}/users**
pub async fn list_team_users(
    AuthUser(me): AuthUser,
    State(state): State<TeamsState>,
    ValidatedPath(team_id): ValidatedPath<Uuid>,
) -> Result<Json<Vec<UserResponse>>> {
    let users = state.service.list_users(&me, team_id).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Link a user to a team
///
/// **POST /teams/{id}/users/{user_id}**
///
/// 404 `user_not_found` for an unknown user, 409 `user_already_member`
/// when the link exists.
pub async fn link_user(
    AuthUser(me): AuthUser,
    State(state): State<TeamsState>,
    ValidatedPath((team_id, user_id)): ValidatedPath<(Uuid, Uuid)>,
) -> Result<Json<StatusResponse>> {
    state.service.link_user(&me, team_id, user_id).await?;

    Ok(Json(StatusResponse::ok("User linked")))
}

/// Unlink a user from a team
///
/// **DELETE /teams/{id}/users/{user_id}**
///
/// 404 `user_not_found` for an unknown user, 409 `user_not_member` when
/// there is no link to remove.
pub async fn unlink_user(
    AuthUser(me): AuthUser,
    State(state): State<TeamsState>,
    ValidatedPath((team_id, user_id)): ValidatedPath<(Uuid, Uuid)>,
) -> Result<Json<StatusResponse>> {
    state.service.unlink_user(&me, team_id, user_id).await?;

    Ok(Json(StatusResponse::ok("User unlinked")))
}
