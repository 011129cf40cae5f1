mod common;

use axum::http::StatusCode;
use common::{
    create_test_coach, create_test_course, create_test_skill, create_test_user, send,
    setup_test_app, token_for,
};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

fn course_body(skill_id: Uuid) -> Value {
    json!({
        "skill_id": skill_id.to_string(),
        "name": "Morning Flow",
        "description": "Vinyasa for beginners",
        "start_at": "2030-03-01T10:00:00Z",
        "end_at": "2030-03-01T11:00:00Z",
        "max_participants": 10,
        "meeting_url": "https://meet.example.com/flow"
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_promote_user_to_coach(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let user = create_test_user(&pool, "USER").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/admin/coaches/{}", user.id),
        None,
        Some(json!({
            "experience_years": 3,
            "description": "Pilates instructor",
            "profile_image_url": "https://cdn.example.com/me.png"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["role"], "COACH");
    assert_eq!(body["data"]["coach"]["user_id"], user.id.to_string());
    assert_eq!(body["data"]["coach"]["experience_years"], 3);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/admin/coaches/{}", user.id),
        None,
        Some(json!({"experience_years": 3, "description": "Again"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User is already a coach");

    let coaches = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM coaches WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(coaches, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_promote_validation(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let user = create_test_user(&pool, "USER").await;
    let uri = format!("/api/admin/coaches/{}", user.id);

    for body in [
        json!({"experience_years": -1, "description": "x"}),
        json!({"experience_years": 2.5, "description": "x"}),
        json!({"experience_years": 2, "description": "  "}),
        json!({"experience_years": 2, "description": "x", "profile_image_url": "http://x.png"}),
    ] {
        let (status, response) = send(&app, "POST", &uri, None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Invalid field values");
    }

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/admin/coaches/{}", Uuid::new_v4()),
        None,
        Some(json!({"experience_years": 2, "description": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_coach_creates_course(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let coach = create_test_coach(&pool).await;
    let skill_id = create_test_skill(&pool, "Yoga").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/coaches/courses",
        Some(&token_for(&coach.user)),
        Some(course_body(skill_id)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["course"]["user_id"], coach.user.id.to_string());
    assert_eq!(body["data"]["course"]["max_participants"], 10);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_routes_require_coach(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let user = create_test_user(&pool, "USER").await;
    let skill_id = create_test_skill(&pool, "Yoga").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/coaches/courses",
        Some(&token_for(&user)),
        Some(course_body(skill_id)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User is not a coach");

    let (status, body) = send(&app, "GET", "/api/admin/coaches/courses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You are not logged in");

    let (status, body) = send(
        &app,
        "PUT",
        "/api/admin/coaches",
        Some(&token_for(&user)),
        Some(json!({
            "experience_years": 3,
            "description": "Strength coach"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User is not a coach");

    let uri = format!("/api/admin/coaches/courses/{}", Uuid::new_v4());
    let (status, body) = send(&app, "GET", &uri, Some(&token_for(&user)), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User is not a coach");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_date_and_skill_checks(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let coach = create_test_coach(&pool).await;
    let token = token_for(&coach.user);
    let skill_id = create_test_skill(&pool, "Yoga").await;

    let mut body = course_body(skill_id);
    body["start_at"] = json!("01/03/2030");
    let (status, response) = send(&app, "POST", "/api/admin/coaches/courses", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Invalid date format, use ISO 8601");

    let mut body = course_body(skill_id);
    body["start_at"] = json!("2030-03-01T12:00:00Z");
    let (_, response) = send(&app, "POST", "/api/admin/coaches/courses", Some(&token), Some(body)).await;
    assert_eq!(response["message"], "Start time cannot be later than end time");

    let (_, response) = send(
        &app,
        "POST",
        "/api/admin/coaches/courses",
        Some(&token),
        Some(course_body(Uuid::new_v4())),
    )
    .await;
    assert_eq!(response["message"], "Skill not found");

    let mut body = course_body(skill_id);
    body["meeting_url"] = json!("http://meet.example.com");
    let (_, response) = send(&app, "POST", "/api/admin/coaches/courses", Some(&token), Some(body)).await;
    assert_eq!(response["message"], "Invalid field values");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_course_checks_ownership(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let owner = create_test_coach(&pool).await;
    let other = create_test_coach(&pool).await;
    let skill_id = create_test_skill(&pool, "Yoga").await;
    let course_id = create_test_course(&pool, owner.user.id, skill_id, 5).await;
    let uri = format!("/api/admin/coaches/courses/{}", course_id);

    let (status, body) = send(&app, "PUT", &uri, Some(&token_for(&other.user)), Some(course_body(skill_id))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Course not found");

    let mut update = course_body(skill_id);
    update["name"] = json!("Evening Flow");
    let (status, body) = send(&app, "PUT", &uri, Some(&token_for(&owner.user)), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["course"]["name"], "Evening Flow");

    let (status, body) = send(
        &app,
        "PUT",
        "/api/admin/coaches/courses/42",
        Some(&token_for(&owner.user)),
        Some(course_body(skill_id)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_own_courses_include_participants(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let coach = create_test_coach(&pool).await;
    let skill_id = create_test_skill(&pool, "Yoga").await;
    let course_id = create_test_course(&pool, coach.user.id, skill_id, 5).await;
    let token = token_for(&coach.user);

    let (status, body) = send(&app, "GET", "/api/admin/coaches/courses", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["participants"], 0);
    assert_eq!(body["data"][0]["skill_name"], "Yoga");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/admin/coaches/courses/{}", course_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], course_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_coach_updates_own_profile(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let coach = create_test_coach(&pool).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/admin/coaches",
        Some(&token_for(&coach.user)),
        Some(json!({"experience_years": 9, "description": "Now teaching HIIT"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["experience_years"], 9);
    assert_eq!(body["data"]["id"], coach.coach_id.to_string());
}
