//! Route definitions for Teams domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{team_users, teams};
use super::middleware::TeamsState;

/// Create team management routes
fn team_routes() -> Router<TeamsState> {
    Router::new()
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/check", post(teams::check_identifier))
        .route(
            "/teams/{id}",
            get(teams::get_team)
                .put(teams::update_team)
                .patch(teams::patch_team)
                .delete(teams::delete_team),
        )
}

/// Create team membership routes
fn team_user_routes() -> Router<TeamsState> {
    Router::new()
        .route("/teams/{id}/users", get(team_users::list_team_users))
        .route(
            "/teams/{id}/users/{user_id}",
            post(team_users::link_user).delete(team_users::unlink_user),
        )
}

/// Create all Teams domain API routes
pub fn routes() -> Router<TeamsState> {
    Router::new()
        .merge(team_routes())
        .merge(team_user_routes())
}
