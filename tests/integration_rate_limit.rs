mod common;

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use common::{generate_unique_email, test_state};
use livefit::livefit_config::RateLimitConfig;
use livefit::router::init_router;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

/// One login per minute per address.
fn strict_rate_limit_config() -> RateLimitConfig {
    RateLimitConfig {
        enabled: true,
        signup_per_second: 60,
        signup_burst_size: 1,
        login_per_second: 60,
        login_burst_size: 1,
    }
}

fn login_request(ip: [u8; 4]) -> Request<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri("/api/users/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": generate_unique_email(),
                "password": "Passw0rdOk"
            }))
            .unwrap(),
        ))
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((ip, 40000))));
    request
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_rate_limit_exceeded(pool: PgPool) {
    let app = init_router(test_state(pool, strict_rate_limit_config())).unwrap();

    let first = app.clone().oneshot(login_request([10, 0, 0, 1])).await.unwrap();
    // processed normally: the account does not exist
    assert_eq!(first.status(), StatusCode::BAD_REQUEST);

    let second = app.clone().oneshot(login_request([10, 0, 0, 1])).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    // other addresses have their own budget
    let other = app.oneshot(login_request([10, 0, 0, 2])).await.unwrap();
    assert_eq!(other.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_disabled_rate_limit_allows_bursts(pool: PgPool) {
    let app = init_router(test_state(pool, RateLimitConfig::disabled())).unwrap();

    for _ in 0..5 {
        let response = app.clone().oneshot(login_request([10, 0, 0, 3])).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
