use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use summit_config::{ConnectionResolver, DatabaseSettings};
use summit_db::{DbClient, LazyDbClient};
use summit_registration::{routes, RegistrationState, SqlRegistrationStore};
use tempfile::TempDir;
use tower::ServiceExt;

const ACCESS_KEY: &str = "bengala-2026";

async fn sqlite_app(dir: &TempDir, access_key: Option<&str>) -> Router {
    let url = format!("sqlite://{}", dir.path().join("summit.db").display());
    let client = DbClient::from_url(&url, &DatabaseSettings::default())
        .await
        .unwrap();
    let store = SqlRegistrationStore::new(Arc::new(LazyDbClient::from_client(client)));
    routes(Arc::new(RegistrationState::new(store, access_key)))
}

fn unconfigured_app() -> Router {
    let settings = DatabaseSettings::default();
    let resolver =
        ConnectionResolver::with_lookup(Arc::new(|_: &str| -> Option<String> { None }), &settings);
    let store = SqlRegistrationStore::new(Arc::new(LazyDbClient::new(resolver, settings)));
    routes(Arc::new(RegistrationState::new(store, None)))
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_register_created_then_conflict() {
    let dir = TempDir::new().unwrap();
    let app = sqlite_app(&dir, None).await;
    let body = json!({"name": "Ana Ruiz", "email": "ana@example.com"}).to_string();

    let (status, json) = send(&app, post_json(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["email"], "ana@example.com");
    assert_eq!(json["id"], 1);
    assert!(json.get("error").is_none());

    let (status, json) = send(&app, post_json(&body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "email_already_registered");
    assert_eq!(json["message"], "This email is already registered.");
}

#[tokio::test]
async fn test_validation_failures_are_400() {
    let dir = TempDir::new().unwrap();
    let app = sqlite_app(&dir, None).await;

    let (status, json) = send(
        &app,
        post_json(r#"{"name": "Bob", "email": "not-an-email", "message": "hi"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_email");

    let (status, json) = send(&app, post_json(r#"{"email": "ana@example.com"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing_fields");

    let (status, json) = send(&app, post_json("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "invalid_json");
}

#[tokio::test]
async fn test_unconfigured_database_is_a_generic_500() {
    let app = unconfigured_app();

    let (status, json) = send(
        &app,
        post_json(r#"{"name": "Ana", "email": "ana@example.com"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "configuration_error");
    assert!(!json["message"].as_str().unwrap().contains("DATABASE_URL"));
}

#[tokio::test]
async fn test_listing_requires_the_access_key() {
    let dir = TempDir::new().unwrap();
    let app = sqlite_app(&dir, Some(ACCESS_KEY)).await;
    send(
        &app,
        post_json(r#"{"name": "Ana", "email": "ana@example.com", "message": "hola"}"#),
    )
    .await;

    let (status, json) = send(&app, get("/registrations")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], 401);

    let (status, _) = send(&app, get("/registrations?key=wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = send(&app, get(&format!("/registrations?key={ACCESS_KEY}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 1);
    assert_eq!(json["registrations"][0]["email"], "ana@example.com");
    assert_eq!(json["registrations"][0]["message"], "hola");
}

#[tokio::test]
async fn test_listing_is_disabled_without_a_key() {
    let dir = TempDir::new().unwrap();
    let app = sqlite_app(&dir, None).await;

    let (status, json) = send(&app, get("/registrations?key=anything")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], 404);
}
