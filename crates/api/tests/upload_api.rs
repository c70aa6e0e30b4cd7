//! HTTP-level integration tests for image uploads.

mod common;

use std::io::Cursor;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, editor_token, get};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "pondasi-test-boundary";

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([90u8, 90, 90]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Build a multipart body from `(field, file name, bytes)` parts and an
/// optional `folder` field.
fn multipart_body(files: &[(&str, &str, &[u8])], folder: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(folder) = folder {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folder\"\r\n\r\n{folder}\r\n"
            )
            .as_bytes(),
        );
    }
    for (field, file_name, data) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(app: axum::Router, uri: &str, token: &str, body: Vec<u8>) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

fn stored_files(root: &Path) -> usize {
    walk(root)
}

fn walk(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                walk(&path)
            } else {
                1
            }
        })
        .sum()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn png_is_stored_as_webp_and_served(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let token = editor_token(&pool).await;
    let app = common::build_test_app_with_config(
        pool,
        common::test_config_with_uploads(dir.path().to_path_buf()),
    );

    let body = multipart_body(&[("file", "site.png", &png_bytes(128, 32))], Some("gallery"));
    let response = upload(app.clone(), "/api/v1/admin/uploads/image", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let path = json["data"]["path"].as_str().unwrap().to_string();
    assert!(path.starts_with("/uploads/gallery/"));
    assert!(path.ends_with(".webp"));
    assert_eq!(json["data"]["original_format"], "png");
    // Downscaled to the configured 64px longest edge.
    assert_eq!(json["data"]["width"], 64);
    assert_eq!(json["data"]["height"], 16);

    let relative = path.trim_start_matches("/uploads/");
    let bytes = std::fs::read(dir.path().join(relative)).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WEBP");

    let response = get(app, &path).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_upload_is_rejected_without_writing(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let token = editor_token(&pool).await;
    let app = common::build_test_app_with_config(
        pool,
        common::test_config_with_uploads(dir.path().to_path_buf()),
    );

    let body = multipart_body(&[("file", "notes.png", b"plain text, not pixels")], None);
    let response = upload(app, "/api/v1/admin/uploads/image", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "IMAGE_CONVERSION_FAILED");
    assert_eq!(stored_files(dir.path()), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn batch_is_all_or_nothing(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let token = editor_token(&pool).await;
    let app = common::build_test_app_with_config(
        pool,
        common::test_config_with_uploads(dir.path().to_path_buf()),
    );

    let good = png_bytes(8, 8);
    let body = multipart_body(
        &[("files[]", "a.png", &good), ("files[]", "b.png", b"broken")],
        Some("projects"),
    );
    let response = upload(app.clone(), "/api/v1/admin/uploads/images", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stored_files(dir.path()), 0);

    let body = multipart_body(
        &[("files", "a.png", &good), ("files", "b.png", &good)],
        Some("projects"),
    );
    let response = upload(app, "/api/v1/admin/uploads/images", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
    assert_eq!(stored_files(dir.path()), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsafe_folder_and_missing_file_are_bad_requests(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let token = editor_token(&pool).await;
    let app = common::build_test_app_with_config(
        pool,
        common::test_config_with_uploads(dir.path().to_path_buf()),
    );

    let body = multipart_body(&[("file", "a.png", &png_bytes(4, 4))], Some("../etc"));
    let response = upload(app.clone(), "/api/v1/admin/uploads/image", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = multipart_body(&[], Some("gallery"));
    let response = upload(app, "/api/v1/admin/uploads/images", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stored_files(dir.path()), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn uploads_require_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/uploads/image")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(&[], None)))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn oversized_source_dimensions_are_rejected(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let token = editor_token(&pool).await;
    let app = common::build_test_app_with_config(
        pool,
        common::test_config_with_uploads(dir.path().to_path_buf()),
    );

    // Wider than the configured 512px source limit.
    let body = multipart_body(&[("file", "panorama.png", &png_bytes(600, 4))], None);
    let response = upload(app, "/api/v1/admin/uploads/image", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "IMAGE_CONVERSION_FAILED");
    assert_eq!(stored_files(dir.path()), 0);
}
