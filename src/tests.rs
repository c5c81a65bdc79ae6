// HTTP tests for the Track API router

use super::*;
use crate::auth::{
    password::test_cost, InMemoryCredentialStore, PasswordService, SqliteCredentialStore,
    TokenService,
};
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

const SECRET: &str = "test_secret_key_for_testing_purposes";

// ============================================================================
// Test Helpers
// ============================================================================

fn create_test_server() -> TestServer {
    let auth = AuthService::new(
        Arc::new(InMemoryCredentialStore::new()),
        PasswordService::new(test_cost()).unwrap(),
        TokenService::new(SECRET),
    );
    TestServer::new(create_router(AppState::new(auth, TrackStore::new()))).unwrap()
}

async fn create_sqlite_test_server() -> TestServer {
    let pool = crate::db::create_pool("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    crate::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let auth = AuthService::new(
        Arc::new(SqliteCredentialStore::new(pool)),
        PasswordService::new(test_cost()).unwrap(),
        TokenService::new(SECRET),
    );
    TestServer::new(create_router(AppState::new(auth, TrackStore::new()))).unwrap()
}

fn credentials(login: &str, password: &str) -> Value {
    json!({ "login": login, "password": password })
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

fn track_payload(title: &str) -> Value {
    json!({ "title": title, "artist": "Test Artist", "duration": 200 })
}

// ============================================================================
// Registration and login
// ============================================================================

#[tokio::test]
async fn test_alice_scenario() {
    let server = create_test_server();

    let response = server.post("/users/").json(&credentials("alice", "s3cret!")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let user: UserResponse = response.json();
    assert!(user.id > 0, "User should have a valid ID");
    assert_eq!(user.login, "alice");

    let response = server.post("/login/").json(&credentials("alice", "s3cret!")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let token: TokenResponse = response.json();
    assert!(!token.access_token.is_empty());
    assert_eq!(token.token_type, "bearer");

    let response = server.post("/login/").json(&credentials("alice", "wrong")).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server.post("/users/").json(&credentials("alice", "other")).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_registration_response_excludes_password_hash() {
    let server = create_test_server();

    let response = server.post("/users/").json(&credentials("alice", "s3cret!")).await;
    let body: Value = response.json();

    let fields = body.as_object().unwrap();
    assert_eq!(fields.len(), 2);
    assert!(fields.contains_key("id"));
    assert!(fields.contains_key("login"));
    assert!(!response.text().contains("argon2"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = create_test_server();
    server.post("/users/").json(&credentials("alice", "s3cret!")).await;

    let wrong_password = server.post("/login/").json(&credentials("alice", "wrong")).await;
    let unknown_login = server.post("/login/").json(&credentials("bob", "s3cret!")).await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_login.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_login.text());

    let body: Value = wrong_password.json();
    assert_eq!(body["error"], "Invalid login or password");
}

#[tokio::test]
async fn test_empty_fields_are_rejected() {
    let server = create_test_server();

    let response = server.post("/users/").json(&credentials("", "s3cret!")).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.post("/users/").json(&credentials("alice", "")).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.post("/login/").json(&credentials("", "")).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_fields_are_rejected_as_json_errors() {
    let server = create_test_server();

    for path in ["/users/", "/login/"] {
        let response = server.post(path).json(&json!({ "login": "alice" })).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", path);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("password"), "{}", path);

        let response = server.post(path).text("login=alice&password=s3cret!").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", path);
        let body: Value = response.json();
        assert!(body["error"].is_string(), "{}", path);
    }

    // Nothing was registered by the rejected requests
    let response = server.post("/users/").json(&credentials("alice", "s3cret!")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_sqlite_backed_registration() {
    let server = create_sqlite_test_server().await;

    let response = server.post("/users/").json(&credentials("alice", "s3cret!")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let alice: UserResponse = response.json();

    let response = server.post("/users/").json(&credentials("bob", "hunter2")).await;
    let bob: UserResponse = response.json();
    assert_ne!(alice.id, bob.id);

    let response = server.post("/users/").json(&credentials("alice", "again")).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = server.post("/login/").json(&credentials("bob", "hunter2")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

// ============================================================================
// Bearer-protected endpoint
// ============================================================================

#[tokio::test]
async fn test_me_with_valid_token() {
    let server = create_test_server();
    server.post("/users/").json(&credentials("alice", "s3cret!")).await;
    let token: TokenResponse = server
        .post("/login/")
        .json(&credentials("alice", "s3cret!"))
        .await
        .json();

    let response = server
        .get("/users/me")
        .add_header(header::AUTHORIZATION, bearer(&token.access_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let user: UserResponse = response.json();
    assert_eq!(user.login, "alice");
}

#[tokio::test]
async fn test_me_rejects_missing_and_invalid_tokens() {
    let server = create_test_server();

    let response = server.get("/users/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/users/me")
        .add_header(header::AUTHORIZATION, bearer("not.a.token"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let forged = TokenService::new("someone_else")
        .issue("alice", chrono::Duration::minutes(30))
        .unwrap();
    let response = server
        .get("/users/me")
        .add_header(header::AUTHORIZATION, bearer(&forged))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Tracks
// ============================================================================

#[tokio::test]
async fn test_track_crud_flow() {
    let server = create_test_server();

    let response = server.get("/tracks").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let tracks: Vec<Track> = response.json();
    assert!(tracks.is_empty());

    let response = server.post("/tracks").json(&track_payload("First")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Track added successfully");
    server.post("/tracks").json(&track_payload("Second")).await;

    let track: Track = server.get("/track/1").await.json();
    assert_eq!(track.title, "Second");

    let response = server
        .put("/track/0")
        .json(&json!({ "title": "Renamed", "artist": "Someone", "duration": 90 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let track: Track = server.get("/track/0").await.json();
    assert_eq!(track.title, "Renamed");
    assert_eq!(track.duration, 90);

    let response = server.delete("/track/0").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let tracks: Vec<Track> = server.get("/tracks").await.json();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "Second");
}

#[tokio::test]
async fn test_missing_track_is_not_found() {
    let server = create_test_server();

    for response in [
        server.get("/track/0").await,
        server.get("/track/-1").await,
        server.put("/track/3").json(&track_payload("x")).await,
        server.delete("/track/0").await,
    ] {
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "Track not found");
    }
}

#[tokio::test]
async fn test_track_with_empty_title_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/tracks")
        .json(&json!({ "title": "", "artist": "Someone", "duration": 90 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let tracks: Vec<Track> = server.get("/tracks").await.json();
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_track_with_missing_fields_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/tracks")
        .json(&json!({ "artist": "Someone", "duration": 90 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("title"));

    let response = server.post("/tracks").text("not json").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());

    server.post("/tracks").json(&track_payload("First")).await;
    let response = server.put("/track/0").json(&json!({ "title": "Renamed" })).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let tracks: Vec<Track> = server.get("/tracks").await.json();
    assert_eq!(tracks, vec![serde_json::from_value::<Track>(track_payload("First")).unwrap()]);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let server = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let doc: Value = response.json();
    assert!(doc["paths"]["/login/"].is_object());
    assert!(doc["paths"]["/track/{id}"].is_object());
}
