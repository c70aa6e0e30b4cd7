//! HTTP-level integration tests for login, refresh, logout and role checks.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, get_auth, post_json, post_json_auth, token_for, TEST_PASSWORD,
};
use pondasi_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use serde_json::json;
use sqlx::PgPool;

async fn login(app: axum::Router, username: &str, password: &str) -> axum::http::Response<axum::body::Body> {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": username, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_token_pair_and_user(pool: PgPool) {
    let user = create_user(&pool, "siti", ROLE_ADMIN).await;
    let app = common::build_test_app(pool);

    let response = login(app, "siti", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "admin");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_and_unknown_user_are_401(pool: PgPool) {
    create_user(&pool, "budi", ROLE_EDITOR).await;
    let app = common::build_test_app(pool);

    let response = login(app.clone(), "budi", "not-the-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(app, "nobody", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn account_locks_after_five_failures(pool: PgPool) {
    create_user(&pool, "rina", ROLE_EDITOR).await;
    let app = common::build_test_app(pool);

    for _ in 0..5 {
        let response = login(app.clone(), "rina", "wrong-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = login(app, "rina", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_session(pool: PgPool) {
    create_user(&pool, "agus", ROLE_EDITOR).await;
    let app = common::build_test_app(pool);

    let tokens = body_json(login(app.clone(), "agus", TEST_PASSWORD).await).await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], tokens["refresh_token"]);

    // The old refresh token was revoked by the rotation.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    create_user(&pool, "dewi", ROLE_EDITOR).await;
    let app = common::build_test_app(pool);

    let tokens = body_json(login(app.clone(), "dewi", TEST_PASSWORD).await).await;
    let access = tokens["access_token"].as_str().unwrap();

    let response = post_json_auth(app.clone(), "/api/v1/auth/logout", json!({}), access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": tokens["refresh_token"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_routes_require_token_and_role(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let admin = create_user(&pool, "admin", ROLE_ADMIN).await;
    let app = common::build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/admin/categories").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.clone(), "/api/v1/admin/categories", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Editors manage content but not prices or the organization chart.
    let editor_token = token_for(&editor);
    let response = get_auth(app.clone(), "/api/v1/admin/categories", &editor_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_auth(app.clone(), "/api/v1/admin/prices/concrete", &editor_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = get_auth(app.clone(), "/api/v1/admin/organization", &editor_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token = token_for(&admin);
    let response = get_auth(app, "/api/v1/admin/prices/concrete", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
