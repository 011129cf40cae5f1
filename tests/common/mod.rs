#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use livefit::livefit_auth::create_access_token;
use livefit::livefit_config::{CorsConfig, JwtConfig, RateLimitConfig};
use livefit::livefit_core::{LocalFileStorage, hash_password};
use livefit::router::init_router;
use livefit::state::AppState;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "Passw0rdOk";

pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

pub struct TestCoach {
    pub user: TestUser,
    pub coach_id: Uuid,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new("test_secret_key_for_testing_purposes", 30)
}

pub fn test_upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("livefit-test-uploads-{}", Uuid::new_v4()))
}

pub fn test_state(pool: PgPool, rate_limit_config: RateLimitConfig) -> AppState {
    let upload_dir = test_upload_dir();
    AppState {
        db: pool,
        jwt_config: jwt_config(),
        cors_config: CorsConfig::parse("http://localhost:5173"),
        rate_limit_config,
        storage: Arc::new(LocalFileStorage::new(
            upload_dir.clone(),
            "http://localhost:3000/uploads".to_string(),
        )),
        upload_dir: Some(upload_dir),
    }
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    init_router(test_state(pool, RateLimitConfig::disabled())).unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn unique_name(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{} {}", prefix, &suffix[..8])
}

pub async fn create_test_user(pool: &PgPool, role: &str) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind("Test User")
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        name: "Test User".to_string(),
        email,
        role: role.to_string(),
    }
}

pub async fn create_test_coach(pool: &PgPool) -> TestCoach {
    let user = create_test_user(pool, "COACH").await;

    let coach_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO coaches (user_id, experience_years, description)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user.id)
    .bind(5)
    .bind("Strength and mobility")
    .fetch_one(pool)
    .await
    .unwrap();

    TestCoach { user, coach_id }
}

pub async fn create_test_skill(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO skills (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_course(
    pool: &PgPool,
    owner_id: Uuid,
    skill_id: Uuid,
    max_participants: i32,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses
            (user_id, skill_id, name, description, start_at, end_at, max_participants, meeting_url)
         VALUES ($1, $2, $3, $4, now() + interval '1 day', now() + interval '1 day 1 hour', $5, $6)
         RETURNING id",
    )
    .bind(owner_id)
    .bind(skill_id)
    .bind("Morning Flow")
    .bind("Vinyasa for beginners")
    .bind(max_participants)
    .bind("https://meet.example.com/flow")
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_package(pool: &PgPool, credit_amount: i32, price: i32) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO credit_packages (name, credit_amount, price) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(unique_name("Package"))
    .bind(credit_amount)
    .bind(price)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn give_credits(pool: &PgPool, user_id: Uuid, credits: i32) {
    let package_id = create_test_package(pool, credits, 100).await;
    sqlx::query(
        "INSERT INTO credit_purchases (user_id, credit_package_id, purchased_credits, price_paid)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(package_id)
    .bind(credits)
    .bind(100)
    .execute(pool)
    .await
    .unwrap();
}

pub fn token_for(user: &TestUser) -> String {
    create_access_token(user.id, &user.role, &jwt_config()).unwrap()
}

/// Sends a JSON request and returns the status with the parsed body
/// (`Value::Null` when the body is empty).
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    read_response(response).await
}

pub async fn read_response(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
