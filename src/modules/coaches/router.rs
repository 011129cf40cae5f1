use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_coach, get_coach_courses, get_coaches};

pub fn init_coaches_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_coaches))
        .route("/{coach_id}", get(get_coach))
        .route("/{coach_id}/courses", get(get_coach_courses))
}
