use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_course, get_own_course, get_own_courses, promote_to_coach, update_coach_profile,
    update_course,
};

/// Coach-only handlers take `RequireCoach`; promotion is open.
pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/coaches", put(update_coach_profile))
        .route("/coaches/courses", post(create_course).get(get_own_courses))
        .route(
            "/coaches/courses/{course_id}",
            get(get_own_course).put(update_course),
        )
        .route("/coaches/{user_id}", post(promote_to_coach))
}
