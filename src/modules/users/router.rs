use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_governor::GovernorLayer;

use crate::modules::users::controller::{
    change_password, get_credit_packages, get_my_courses, get_profile, login, signup,
    update_profile,
};
use crate::state::AppState;

pub fn init_users_router(state: &AppState) -> anyhow::Result<Router<AppState>> {
    let mut signup_route = Router::new().route("/signup", post(signup));
    let mut login_route = Router::new().route("/login", post(login));

    let limits = &state.rate_limit_config;
    if limits.enabled {
        signup_route =
            signup_route.layer(GovernorLayer::new(Arc::new(limits.signup_governor_config()?)));
        login_route =
            login_route.layer(GovernorLayer::new(Arc::new(limits.login_governor_config()?)));
    }

    Ok(Router::new()
        .merge(signup_route)
        .merge(login_route)
        .route("/profile", get(get_profile).put(update_profile))
        .route("/password", put(change_password))
        .route("/credit-package", get(get_credit_packages))
        .route("/courses", get(get_my_courses)))
}
