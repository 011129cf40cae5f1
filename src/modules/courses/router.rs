use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{book_course, cancel_booking, get_courses};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_courses))
        .route("/{course_id}", post(book_course).delete(cancel_booking))
}
