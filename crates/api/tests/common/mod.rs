#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use pondasi_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use pondasi_db::models::user::{CreateUser, User};
use pondasi_db::repositories::UserRepo;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use pondasi_api::auth::jwt::{generate_access_token, JwtConfig};
use pondasi_api::auth::password::hash_password;
use pondasi_api::config::{CompanyConfig, ServerConfig, UploadConfig};
use pondasi_api::router::build_app_router;
use pondasi_api::state::AppState;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uploads go to a fresh directory under the system temp dir.
pub fn test_config() -> ServerConfig {
    let upload_dir = std::env::temp_dir().join(format!("pondasi-test-{}", uuid::Uuid::new_v4()));
    test_config_with_uploads(upload_dir)
}

pub fn test_config_with_uploads(dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        app_url: "http://localhost:3000".to_string(),
        jwt: test_jwt_config(),
        upload: UploadConfig {
            dir,
            max_bytes: 1024 * 1024,
            max_dimension: 64,
            max_source_dimension: 512,
        },
        company: CompanyConfig {
            name: "PT Pondasi Konstruksi".to_string(),
            address: "Jl. Industri No. 1, Bekasi".to_string(),
            phone: "+62 21 555 0101".to_string(),
            email: "info@pondasi.test".to_string(),
            whatsapp: "+62 812 0000 0000".to_string(),
            maps_url: None,
        },
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Build the full application router, with every middleware layer, around
/// the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.username, &user.role, &test_jwt_config())
        .expect("token generation should succeed")
}

/// Create an admin and return its bearer token.
pub async fn admin_token(pool: &PgPool) -> String {
    token_for(&create_user(pool, "admin", ROLE_ADMIN).await)
}

/// Create an editor and return its bearer token.
pub async fn editor_token(pool: &PgPool) -> String {
    token_for(&create_user(pool, "editor", ROLE_EDITOR).await)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
