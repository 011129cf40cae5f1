use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{create_skill, delete_skill, get_skills};

pub fn init_skills_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_skills).post(create_skill))
        .route("/{skill_id}", delete(delete_skill))
}
