//! HTTP-level integration tests for categories and articles.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, editor_token, get, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

async fn create_category(app: axum::Router, token: &str, name: &str) -> serde_json::Value {
    let response = post_json_auth(app, "/api/v1/admin/categories", json!({ "name": name }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn category_slug_is_derived_from_name(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let category = create_category(app.clone(), &token, "Berita Proyek").await;
    assert_eq!(category["slug"], "berita-proyek");

    let id = category["id"].as_i64().unwrap();
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/categories/{id}"),
        json!({ "description": "Kabar terbaru" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["description"], "Kabar terbaru");
    assert_eq!(json["data"]["name"], "Berita Proyek");

    let response = delete_auth(app.clone(), &format!("/api/v1/admin/categories/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(app, &format!("/api/v1/admin/categories/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn article_create_derives_slug_excerpt_and_draft_status(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/admin/articles",
        json!({
            "title": "Pengecoran Jalan Tol Seksi 2",
            "content": "<p>Pekerjaan <strong>pengecoran</strong> selesai tepat waktu.</p>",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "pengecoran-jalan-tol-seksi-2");
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["excerpt"], "Pekerjaan pengecoran selesai tepat waktu.");
    assert!(json["data"]["published_at"].is_null());
    assert!(json["data"]["created_by"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn article_validation_errors_are_reported_per_field(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/admin/articles",
        json!({ "title": "", "content": "x", "status": "deleted", "slug": "Not A Slug" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["title"].is_array());
    assert!(json["fields"]["status"].is_array());
    assert!(json["fields"]["slug"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_article_slug_is_409(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({ "title": "Aspal Hotmix", "content": "<p>a</p>" });
    let response = post_json_auth(app.clone(), "/api/v1/admin/articles", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/admin/articles", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_category_is_invalid_reference(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/admin/articles",
        json!({ "title": "Yatim", "content": "<p>a</p>", "category_id": 999_999 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn publishing_makes_article_public_and_null_detaches_category(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let category = create_category(app.clone(), &token, "Teknik").await;
    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/articles",
        json!({
            "title": "Mutu Beton K-300",
            "content": "<p>Uji tekan silinder.</p>",
            "category_id": category["id"],
        }),
        &token,
    )
    .await;
    let article = body_json(response).await["data"].clone();
    let id = article["id"].as_i64().unwrap();

    // Drafts are not visible publicly.
    let response = get(app.clone(), "/api/v1/pages/id/articles/mutu-beton-k-300").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/articles/{id}"),
        json!({ "status": "published" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert!(updated["data"]["published_at"].is_string());
    assert_eq!(updated["data"]["category_name"], "Teknik");

    let response = get(app.clone(), "/api/v1/pages/id/articles/mutu-beton-k-300").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["data"]["props"]["article"]["view_count"], 1);
    assert_eq!(page["data"]["props"]["seo"]["description"], "Uji tekan silinder.");

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/articles/{id}"),
        json!({ "category_id": null }),
        &token,
    )
    .await;
    let detached = body_json(response).await;
    assert!(detached["data"]["category_id"].is_null());
    assert_eq!(detached["data"]["status"], "published");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_list_filters_by_status_and_query(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    for (title, status) in [
        ("Aspal Jalan Desa", "published"),
        ("Aspal Parkiran", "draft"),
        ("Beton Gudang", "published"),
    ] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/admin/articles",
            json!({ "title": title, "content": "<p>isi</p>", "status": status }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app.clone(), "/api/v1/admin/articles?status=published", &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = get_auth(app, "/api/v1/admin/articles?q=aspal", &token).await;
    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.iter().all(|t| t.starts_with("Aspal")));
}
