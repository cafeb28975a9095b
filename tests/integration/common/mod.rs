//! Shared fixtures for the API integration tests
//!
//! Every test gets its own store seeded with two users and two teams:
//! - `me` is a member of `team1` ("team 1" / "team-1")
//! - `other` is a member of `team2` ("team 2" / "team-2")
//!
//! On Postgres the seeded names carry a random tag so tests sharing one
//! database never collide.

#![allow(dead_code)]

use std::env;
use std::sync::Once;

use apicore_auth::{issue_token, AuthConfig};
use apicore_teams::{Team, TeamsRepositories, TeamsState, User};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

static INIT: Once = Once::new();

const TEST_SECRET: &str = "test_secret_key_for_testing_only"; // pragma: allowlist secret
const TOKEN_TTL_SECONDS: u64 = 3600;

/// Decoded response of a single request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Value,
}

pub struct TestApp {
    pub router: Router,
    /// Suffix appended to seeded names; empty for the in-memory store
    pub tag: String,
    pub repos: TeamsRepositories,
    pub auth_config: AuthConfig,
    pub me: User,
    pub other: User,
    pub team1: Team,
    pub team2: Team,
}

impl TestApp {
    /// Fixture over a fresh in-memory store
    pub async fn new() -> Self {
        Self::seed(TeamsRepositories::in_memory(), String::new()).await
    }

    /// Fixture over the database named by `TEST_DATABASE_URL`, with pending
    /// migrations applied. `None` when the variable is not set.
    pub async fn postgres() -> Option<Self> {
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
        });

        let database_url = env::var("TEST_DATABASE_URL").ok()?;
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&database_url)
            .await
            .unwrap();
        sqlx::migrate!("../../migrations").run(&pool).await.unwrap();

        let tag = format!(" {}", &Uuid::new_v4().simple().to_string()[..8]);
        Some(Self::seed(TeamsRepositories::postgres(pool), tag).await)
    }

    async fn seed(repos: TeamsRepositories, tag: String) -> Self {
        let me = create_user(&repos, "me").await;
        let other = create_user(&repos, "other").await;
        let team1 = create_team(&repos, &tagged(&tag, "team 1"), me.id).await;
        let team2 = create_team(&repos, &tagged(&tag, "team 2"), other.id).await;

        let auth_config = AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            issuer: None,
            audience: None,
        };
        let router =
            apicore_app::build_router(TeamsState::new(repos.clone(), auth_config.clone()));

        Self {
            router,
            tag,
            repos,
            auth_config,
            me,
            other,
            team1,
            team2,
        }
    }

    /// `name` with this fixture's tag appended
    pub fn tagged(&self, name: &str) -> String {
        tagged(&self.tag, name)
    }

    /// Identifier derived from `tagged(name)`
    pub fn tagged_identifier(&self, name: &str) -> String {
        identifier_for(&self.tagged(name))
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        issue_token(&self.auth_config, user_id, None, TOKEN_TTL_SECONDS).unwrap()
    }

    /// Send a request as `me`
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let token = self.token_for(self.me.id);
        self.send_with_token(method, uri, Some(&token), body).await
    }

    pub async fn send_with_token(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            content_type,
            body,
        }
    }

    pub async fn team_count(&self) -> i64 {
        self.repos.teams.count().await.unwrap()
    }

    pub async fn membership_count(&self, user_id: Uuid) -> i64 {
        self.repos.memberships.count_for_user(user_id).await.unwrap()
    }

    pub async fn team_user_ids(&self, team_id: Uuid) -> Vec<Uuid> {
        self.repos
            .users
            .list_by_team(team_id)
            .await
            .unwrap()
            .into_iter()
            .map(|user| user.id)
            .collect()
    }
}

async fn create_user(repos: &TeamsRepositories, name: &str) -> User {
    let user = User::new(
        Uuid::new_v4(),
        Some(format!("{}@apicore.test", name)),
        Some(name.to_string()),
    );
    repos.users.create_if_missing(&user).await.unwrap()
}

async fn create_team(repos: &TeamsRepositories, name: &str, owner: Uuid) -> Team {
    let team = Team::new(name.to_string(), Some(identifier_for(name))).unwrap();
    repos.teams.create_with_owner(&team, owner).await.unwrap()
}

fn tagged(tag: &str, name: &str) -> String {
    format!("{}{}", name, tag)
}

fn identifier_for(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
