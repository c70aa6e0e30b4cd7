//! HTTP-level integration tests for the site search endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, editor_token, get, post_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn search(app: axum::Router, query: &str) -> Value {
    let response = get(app, &format!("/api/search?{query}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn short_query_returns_nothing_but_echoes_seq(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = search(app.clone(), "q=a&seq=7").await;
    assert_eq!(json["results"], json!([]));
    assert_eq!(json["seq"], 7);

    let json = search(app, "q=%20%20&seq=8").await;
    assert_eq!(json["results"], json!([]));
    assert_eq!(json["seq"], 8);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn results_are_grouped_by_type_with_locale_urls(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/projects",
        json!({ "title": "Pengaspalan Jalan Desa Sukamaju", "category": "construction" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/articles",
        json!({
            "title": "Tips Perawatan Aspal",
            "content": "<p>Rawat jalan secara berkala.</p>",
            "status": "published",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let slug = body_json(response).await["data"]["slug"]
        .as_str()
        .unwrap()
        .to_string();

    // Drafts never show up.
    post_json_auth(
        app.clone(),
        "/api/v1/admin/articles",
        json!({ "title": "Draf Aspal Rahasia", "content": "<p>x</p>" }),
        &token,
    )
    .await;

    let json = search(app.clone(), "q=aspal&locale=en&seq=42").await;
    assert_eq!(json["seq"], 42);

    let results = json["results"].as_array().unwrap();
    let kinds: Vec<&str> = results.iter().map(|r| r["type"].as_str().unwrap()).collect();
    assert_eq!(kinds, ["article", "project", "service"]);

    assert_eq!(results[0]["title"], "Tips Perawatan Aspal");
    assert_eq!(results[0]["url"], format!("/en/articles/{slug}"));
    assert_eq!(results[1]["url"], format!("/en/projects/{project_id}"));
    assert_eq!(results[1]["category"], "construction");
    assert_eq!(results[2]["title"], "Hot-Mix Asphalt (AMP)");
    assert!(results[2]["url"].as_str().unwrap().starts_with("/en/"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn like_wildcards_are_literal(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    post_json_auth(
        app.clone(),
        "/api/v1/admin/projects",
        json!({ "title": "Gudang Logistik", "category": "construction" }),
        &token,
    )
    .await;

    let json = search(app, "q=%25%25").await;
    assert_eq!(json["results"], json!([]));
    assert!(json["seq"].is_null());
}
