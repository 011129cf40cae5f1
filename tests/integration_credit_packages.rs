mod common;

use axum::http::StatusCode;
use common::{create_test_package, create_test_user, send, setup_test_app, token_for};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_list_packages(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/credit-package",
        None,
        Some(json!({"name": "7 classes", "credit_amount": 7, "price": 1400})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "7 classes");
    assert_eq!(body["data"]["credit_amount"], 7);
    assert_eq!(body["data"]["price"], 1400);

    let (status, body) = send(&app, "GET", "/api/credit-package", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_package_validation(pool: PgPool) {
    let app = setup_test_app(pool);

    for body in [
        json!({"name": "x", "credit_amount": -1, "price": 100}),
        json!({"name": "x", "credit_amount": 1.5, "price": 100}),
        json!({"name": "x", "credit_amount": 1, "price": "100"}),
        json!({"name": "", "credit_amount": 1, "price": 100}),
    ] {
        let (status, response) = send(&app, "POST", "/api/credit-package", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Invalid field values");
    }

    let body = json!({"name": "Starter", "credit_amount": 3, "price": 600});
    let (status, _) = send(&app, "POST", "/api/credit-package", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, response) = send(&app, "POST", "/api/credit-package", None, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(response["message"], "Duplicate data");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_purchase_copies_package_terms(pool: PgPool) {
    let package_id = create_test_package(&pool, 7, 1400).await;
    let user = create_test_user(&pool, "USER").await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/credit-package/{}", package_id),
        Some(&token_for(&user)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success", "data": null}));

    let (credits, price) = sqlx::query_as::<_, (i32, i32)>(
        "SELECT purchased_credits, price_paid FROM credit_purchases WHERE user_id = $1",
    )
    .bind(user.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(credits, 7);
    assert_eq!(price, 1400);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_purchase_errors(pool: PgPool) {
    let user = create_test_user(&pool, "USER").await;
    let app = setup_test_app(pool);
    let token = token_for(&user);

    let (status, body) = send(&app, "POST", "/api/credit-package/nope", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/credit-package/{}", Uuid::new_v4()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/credit-package/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You are not logged in");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_package(pool: PgPool) {
    let package_id = create_test_package(&pool, 3, 600).await;
    let app = setup_test_app(pool);
    let uri = format!("/api/credit-package/{}", package_id);

    let (status, _) = send(&app, "DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID");
}
