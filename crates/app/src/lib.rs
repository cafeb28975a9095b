//! ApiCore application composition root
//!
//! Picks the storage backend and composes the domain routers into a
//! single application.

use apicore_auth::AuthConfig;
use apicore_common::{json_utf8, Config};
use apicore_teams::{TeamsRepositories, TeamsState};
use axum::{middleware, routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

const MAX_DB_CONNECTIONS: u32 = 10;

/// Create the main application router from configuration
///
/// With `DATABASE_URL` set the Postgres repositories are used and pending
/// migrations are applied; otherwise everything lives in memory.
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let repos = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(MAX_DB_CONNECTIONS)
                .connect(url)
                .await
                .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;

            sqlx::migrate!("../../migrations").run(&pool).await?;
            info!("Database connection established, migrations applied");

            TeamsRepositories::postgres(pool)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory store; data is lost on restart");
            TeamsRepositories::in_memory()
        }
    };

    let state = TeamsState::new(repos, AuthConfig::from(config));

    Ok(build_router(state))
}

/// Compose domain routers with shared infrastructure routes
pub fn build_router(teams_state: TeamsState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(apicore_teams::routes().with_state(teams_state))
        .layer(middleware::map_response(json_utf8))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
