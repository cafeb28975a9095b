//! Team management API handlers
//!
//! Request shaping and status-code mapping only; the rules live in
//! [`TeamsService`](crate::service::TeamsService).

use apicore_common::{StatusResponse, ValidatedJson, ValidatedPath};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::{AuthUser, TeamsState};
use crate::domain::entities::{Team, TeamChanges};
use crate::domain::validation::validate_identifier_format;
use crate::service::Result;

/// Request for creating a new team
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    /// Team display name (1-100 chars)
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Optional identifier (if not provided, derived from name)
    #[validate(custom(function = "validate_identifier_format"))]
    pub identifier: Option<String>,
}

/// Request for checking identifier availability
#[derive(Debug, Deserialize, Validate)]
pub struct IdentifierRequest {
    #[validate(custom(function = "validate_identifier_format"))]
    pub identifier: String,
}

/// Full replacement (PUT). Any `id` in the body is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(custom(function = "validate_identifier_format"))]
    pub identifier: Option<String>,
}

/// Partial update (PATCH)
#[derive(Debug, Deserialize, Validate)]
pub struct PatchTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_identifier_format"))]
    pub identifier: Option<String>,
}

/// Team representation returned by every team endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub identifier: String,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            identifier: team.identifier,
        }
    }
}

/// List teams for the current user
///
/// **GET /teams**
pub async fn list_teams(
    AuthUser(me): AuthUser,
    State(state): State<TeamsState>,
) -> Result<Json<Vec<TeamResponse>>> {
    let teams = state.service.list(&me).await?;

    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

/// Create a new team
///
/// **POST /teams**
///
/// The caller is linked to the new team in the same unit of work.
pub async fn create_team(
    AuthUser(me): AuthUser,
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>)> {
    let team = state
        .service
        .create(&me, request.name, request.identifier)
        .await?;

    Ok((StatusCode::CREATED, Json(team.into())))
}

/// Check whether an identifier is free
///
/// **POST /teams/check**
pub async fn check_identifier(
    AuthUser(_me): AuthUser,
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<IdentifierRequest>,
) -> Result<Json<StatusResponse>> {
    let status = state.service.check_identifier(&request.identifier).await?;

    Ok(Json(status))
}

/// Get team details
///
/// **GET /teams/{id}**
pub async fn get_team(
    AuthUser(me): AuthUser,
    State(state): State<TeamsState>,
    ValidatedPath(team_id): ValidatedPath<Uuid>,
) -> Result<Json<TeamResponse>> {
    let team = state.service.get(&me, team_id).await?;

    Ok(Json(team.into()))
}

/// Replace a team's name and identifier
///
/// **PUT /teams/{id}**
pub async fn update_team(
    AuthUser(me): AuthUser,
    State(state): State<TeamsState>,
    ValidatedPath(team_id): ValidatedPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>> {
    let changes = TeamChanges {
        name: Some(request.name),
        identifier: request.identifier,
    };
    let team = state.service.update(&me, team_id, changes).await?;

    Ok(Json(team.into()))
}

/// Update some of a team's fields
///
/// **PATCH /teams/{id}**
pub async fn patch_team(
    AuthUser(me): AuthUser,
    State(state): State<TeamsState>,
    ValidatedPath(team_id): ValidatedPath<Uuid>,
    ValidatedJson(request): ValidatedJson<PatchTeamRequest>,
) -> Result<Json<TeamResponse>> {
    let changes = TeamChanges {
        name: request.name,
        identifier: request.identifier,
    };
    let team = state.service.update(&me, team_id, changes).await?;

    Ok(Json(team.into()))
}

/// Delete a team
///
/// **DELETE /teams/{id}**
pub async fn delete_team(
    AuthUser(me): AuthUser,
    State(state): State<TeamsState>,
    ValidatedPath(team_id): ValidatedPath<Uuid>,
) -> Result<StatusCode> {
    state.service.delete(&me, team_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
