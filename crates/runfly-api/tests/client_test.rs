// Integration tests for `ApiClient` using wiremock.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use runfly_api::models::{AccessLevelDto, DeployStatusDto, ParamValueDto};
use runfly_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_collaborators_with_owner() {
    let (server, client) = setup().await;

    let body = json!({
        "owner": { "id": "u0", "email": "owner@example.com", "username": "owner" },
        "collaborators": [
            { "id": "u1", "email": "ada@example.com", "access": "readWrite" },
            { "id": "u2", "email": "bob@example.com", "access": "readOnly" },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/p1/collaborators"))
        .and(query_param("authorId", "u0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let team = client.collaborators_with_owner("p1", "u0").await.unwrap();

    assert_eq!(team.owner.email, "owner@example.com");
    assert_eq!(team.collaborators.len(), 2);
    assert_eq!(team.collaborators[0].user.id, "u1");
    assert_eq!(team.collaborators[0].access, AccessLevelDto::ReadWrite);
    assert_eq!(team.collaborators[1].access, AccessLevelDto::ReadOnly);
}

#[tokio::test]
async fn test_invite_collaborator_returns_resolved_user() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/projects/p1/collaborators"))
        .and(body_json(json!({ "email": "ada@example.com", "access": "readOnly" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u7",
            "email": "ada@example.com",
            "username": "ada",
        })))
        .mount(&server)
        .await;

    let user = client
        .invite_collaborator("p1", "ada@example.com", AccessLevelDto::ReadOnly)
        .await
        .unwrap();

    assert_eq!(user.id, "u7");
    assert_eq!(user.username.as_deref(), Some("ada"));
}

#[tokio::test]
async fn test_set_collaborator_access_ignores_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/projects/p1/collaborators/u1"))
        .and(body_json(json!({ "access": "readWrite" })))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client
        .set_collaborator_access("p1", "u1", AccessLevelDto::ReadWrite)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_runs_parses_camel_case() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": "r1",
            "name": "first run",
            "projectId": "p1",
            "dateCreated": "2019-05-03T14:30:00Z",
            "metrics": [
                { "key": "val_acc", "value": 0.9134 },
                { "key": "optimizer", "value": "adam" },
            ],
            "hyperparameters": [{ "key": "lr", "value": 0.001 }],
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/p1/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let runs = client.list_runs("p1").await.unwrap();

    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].project_id, "p1");
    assert_eq!(runs[0].date_created.to_rfc3339(), "2019-05-03T14:30:00+00:00");
    assert_eq!(runs[0].metrics[1].value, ParamValueDto::Text("adam".into()));
}

#[tokio::test]
async fn test_deployment_status_discriminates_on_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/deployments/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "deployed",
            "data": { "endpoint": "https://predict.runfly.dev/r1", "token": "tok-1" },
        })))
        .mount(&server)
        .await;

    let status = client.deployment_status("r1").await.unwrap();

    match status {
        DeployStatusDto::Deployed { data } => {
            assert_eq!(data.endpoint, "https://predict.runfly.dev/r1");
            assert_eq!(data.token.as_deref(), Some("tok-1"));
        }
        other => panic!("expected deployed status, got: {other:?}"),
    }
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_401_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_projects().await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication, got: {result:?}"
    );
}

#[tokio::test]
async fn test_error_body_is_reported_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/projects/p1/collaborators/u1"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "error": "User is not the project owner" })),
        )
        .mount(&server)
        .await;

    let result = client.remove_collaborator("p1", "u1").await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "User is not the project owner");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_json_body_uses_reason_phrase() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let result = client.list_projects().await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_keeps_the_raw_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_projects().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
