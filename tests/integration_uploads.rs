mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, read_response, setup_test_app, token_for};
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "livefit-test-boundary";

fn multipart_body(field: &str, file_name: &str, content_type: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_upload_png(pool: PgPool) {
    let user = create_test_user(&pool, "USER").await;
    let app = setup_test_app(pool);

    let body = multipart_body("file", "avatar.png", "image/png", b"\x89PNG fake image");
    let response = app
        .oneshot(upload_request(Some(&token_for(&user)), body))
        .await
        .unwrap();
    let (status, body) = read_response(response).await;

    assert_eq!(status, StatusCode::OK);
    let url = body["data"]["image_url"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:3000/uploads/images/"));
    assert!(url.ends_with("-avatar.png"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_upload_accepts_files_field(pool: PgPool) {
    let user = create_test_user(&pool, "USER").await;
    let app = setup_test_app(pool);

    let body = multipart_body("files", "photo.jpg", "image/jpeg", b"jpeg bytes");
    let response = app
        .oneshot(upload_request(Some(&token_for(&user)), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_upload_rejects_other_types(pool: PgPool) {
    let user = create_test_user(&pool, "USER").await;
    let app = setup_test_app(pool);

    let body = multipart_body("file", "anim.gif", "image/gif", b"GIF89a");
    let response = app
        .oneshot(upload_request(Some(&token_for(&user)), body))
        .await
        .unwrap();
    let (status, body) = read_response(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unsupported file type");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_upload_rejects_large_file(pool: PgPool) {
    let user = create_test_user(&pool, "USER").await;
    let app = setup_test_app(pool);

    let content = vec![0u8; 2 * 1024 * 1024 + 1];
    let body = multipart_body("file", "big.png", "image/png", &content);
    let response = app
        .oneshot(upload_request(Some(&token_for(&user)), body))
        .await
        .unwrap();
    let (status, body) = read_response(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "File exceeds the 2MB limit");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_upload_rejects_body_over_router_limit(pool: PgPool) {
    let user = create_test_user(&pool, "USER").await;
    let app = setup_test_app(pool);

    let content = vec![0u8; 9 * 1024 * 1024];
    let body = multipart_body("file", "huge.png", "image/png", &content);
    let response = app
        .oneshot(upload_request(Some(&token_for(&user)), body))
        .await
        .unwrap();
    let (status, body) = read_response(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "File exceeds the 2MB limit");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_upload_without_file(pool: PgPool) {
    let user = create_test_user(&pool, "USER").await;
    let app = setup_test_app(pool);

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
    );
    let response = app
        .clone()
        .oneshot(upload_request(Some(&token_for(&user)), body.into_bytes()))
        .await
        .unwrap();
    let (status, body) = read_response(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please select a file to upload");

    let response = app
        .oneshot(upload_request(None, multipart_body("file", "a.png", "image/png", b"x")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
