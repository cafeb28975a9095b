//! Teams API and repository contracts against PostgreSQL
//!
//! Runs only when `TEST_DATABASE_URL` points at a database the tests may
//! migrate and write to; otherwise every test returns early.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use apicore_auth::issue_token;
use apicore_common::{RepositoryError, JSON_UTF8};
use apicore_teams::{Membership, Team, User};

use crate::common::TestApp;

/// Build the Postgres fixture or skip the test
macro_rules! postgres_app_or_skip {
    () => {
        match TestApp::postgres().await {
            Some(app) => app,
            None => {
                eprintln!("⚠️  TEST_DATABASE_URL not set, skipping test");
                return;
            }
        }
    };
}

mod test_postgres_api {
    use super::*;

    #[tokio::test]
    async fn test_lists_only_member_teams() {
        let app = postgres_app_or_skip!();

        let response = app.send(Method::GET, "/teams", None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type.as_deref(), Some(JSON_UTF8));
        assert_eq!(
            response.body,
            json!([{
                "id": app.team1.id,
                "name": app.team1.name,
                "identifier": app.team1.identifier,
            }])
        );
    }

    #[tokio::test]
    async fn test_create_links_caller() {
        let app = postgres_app_or_skip!();

        let response = app
            .send(
                Method::POST,
                "/teams",
                Some(json!({
                    "name": app.tagged("team 3"),
                    "identifier": app.tagged_identifier("team 3"),
                })),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        let team_id: Uuid = serde_json::from_value(response.body["id"].clone()).unwrap();
        assert_eq!(app.membership_count(app.me.id).await, 2);
        assert_eq!(app.team_user_ids(team_id).await, vec![app.me.id]);
    }

    #[tokio::test]
    async fn test_create_with_taken_identifier_conflicts() {
        let app = postgres_app_or_skip!();

        let response = app
            .send(
                Method::POST,
                "/teams",
                Some(json!({"name": "Duplicate", "identifier": app.team2.identifier})),
            )
            .await;

        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.body["error"], "app_error");
        assert_eq!(app.membership_count(app.me.id).await, 1);

        let holder = app
            .repos
            .teams
            .get_by_identifier(&app.team2.identifier)
            .await
            .unwrap();
        assert_eq!(holder.map(|t| t.id), Some(app.team2.id));
    }

    #[tokio::test]
    async fn test_check_identifier() {
        let app = postgres_app_or_skip!();

        let taken = app
            .send(
                Method::POST,
                "/teams/check",
                Some(json!({"identifier": app.team1.identifier})),
            )
            .await;
        assert_eq!(taken.status, StatusCode::CONFLICT);
        assert_eq!(
            taken.body,
            json!({"error": "app_error", "description": "Identifier already exists"})
        );

        let available = app
            .send(
                Method::POST,
                "/teams/check",
                Some(json!({"identifier": app.tagged_identifier("unique name")})),
            )
            .await;
        assert_eq!(available.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_put_rederives_identifier() {
        let app = postgres_app_or_skip!();
        let name = app.tagged("Stay PUT");

        let response = app
            .send(
                Method::PUT,
                &format!("/teams/{}", app.team1.id),
                Some(json!({"id": app.team1.id, "name": name})),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["identifier"], app.tagged_identifier("stay put"));

        let stored = app
            .repos
            .teams
            .get_by_id(app.team1.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, name);
    }

    #[tokio::test]
    async fn test_put_with_taken_identifier_conflicts() {
        let app = postgres_app_or_skip!();

        let response = app
            .send(
                Method::PUT,
                &format!("/teams/{}", app.team1.id),
                Some(json!({"name": "Renamed", "identifier": app.team2.identifier})),
            )
            .await;

        assert_eq!(response.status, StatusCode::CONFLICT);
        let stored = app.repos.teams.get_by_id(app.team1.id).await.unwrap();
        assert_eq!(stored.map(|t| t.identifier), Some(app.team1.identifier.clone()));
    }

    #[tokio::test]
    async fn test_delete_removes_team_and_links() {
        let app = postgres_app_or_skip!();
        let uri = format!("/teams/{}", app.team2.id);

        let response = app.send(Method::DELETE, &uri, None).await;

        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert!(app.repos.teams.get_by_id(app.team2.id).await.unwrap().is_none());
        assert!(app.repos.teams.get_by_id(app.team1.id).await.unwrap().is_some());
        assert_eq!(app.membership_count(app.other.id).await, 0);
        assert_eq!(app.membership_count(app.me.id).await, 1);

        let again = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(again.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_link_and_unlink_user() {
        let app = postgres_app_or_skip!();
        let uri = format!("/teams/{}/users/{}", app.team1.id, app.other.id);

        assert_eq!(app.send(Method::POST, &uri, None).await.status, StatusCode::OK);
        assert_eq!(
            app.team_user_ids(app.team1.id).await,
            vec![app.me.id, app.other.id]
        );

        let again = app.send(Method::POST, &uri, None).await;
        assert_eq!(again.status, StatusCode::CONFLICT);
        assert_eq!(again.body["error"], "user_already_member");

        assert_eq!(app.send(Method::DELETE, &uri, None).await.status, StatusCode::OK);

        let twice = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(twice.status, StatusCode::CONFLICT);
        assert_eq!(twice.body["error"], "user_not_member");
    }

    #[tokio::test]
    async fn test_unknown_caller_is_provisioned_once() {
        let app = postgres_app_or_skip!();
        let newcomer = Uuid::new_v4();
        let token =
            issue_token(&app.auth_config, newcomer, Some("new@apicore.test"), 3600).unwrap();

        for _ in 0..2 {
            let response = app
                .send_with_token(Method::GET, "/teams", Some(&token), None)
                .await;
            assert_eq!(response.status, StatusCode::OK);
            assert_eq!(response.body, json!([]));
        }

        let stored = app.repos.users.get_by_id(newcomer).await.unwrap().unwrap();
        assert_eq!(stored.email.as_deref(), Some("new@apicore.test"));
    }
}

mod test_postgres_repositories {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_identifier_writes_nothing() {
        let app = postgres_app_or_skip!();
        let duplicate = Team::new(app.tagged("Other name"), Some(app.team1.identifier.clone()))
            .unwrap();

        let result = app.repos.teams.create_with_owner(&duplicate, app.me.id).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists)));
        assert!(app.repos.teams.get_by_id(duplicate.id).await.unwrap().is_none());
        assert_eq!(app.membership_count(app.me.id).await, 1);
    }

    #[tokio::test]
    async fn test_unknown_owner_rolls_back_team() {
        let app = postgres_app_or_skip!();
        let team = Team::new(app.tagged("Orphan"), None).unwrap();

        let result = app.repos.teams.create_with_owner(&team, Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
        assert!(app.repos.teams.get_by_id(team.id).await.unwrap().is_none());
        assert!(app
            .repos
            .teams
            .get_by_identifier(&team.identifier)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_to_taken_identifier_is_rejected() {
        let app = postgres_app_or_skip!();
        let mut team = app.team1.clone();
        team.identifier = app.team2.identifier.clone();

        let result = app.repos.teams.update(&team).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_membership_constraints() {
        let app = postgres_app_or_skip!();

        let dangling = Membership::new(app.team1.id, Uuid::new_v4());
        assert!(matches!(
            app.repos.memberships.create(&dangling).await,
            Err(RepositoryError::NotFound)
        ));

        let existing = Membership::new(app.team1.id, app.me.id);
        assert!(matches!(
            app.repos.memberships.create(&existing).await,
            Err(RepositoryError::AlreadyExists)
        ));

        assert!(matches!(
            app.repos.memberships.delete(app.team1.id, app.other.id).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_if_missing_keeps_existing_row() {
        let app = postgres_app_or_skip!();

        let again = User::new(app.me.id, Some("changed@apicore.test".to_string()), None);
        let stored = app.repos.users.create_if_missing(&again).await.unwrap();

        assert_eq!(stored.email, app.me.email);
        assert_eq!(stored.name, app.me.name);
    }
}
