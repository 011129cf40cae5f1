use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_credit_package, delete_credit_package, get_credit_packages, purchase_credit_package,
};

pub fn init_credit_packages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_credit_packages).post(create_credit_package))
        .route(
            "/{credit_package_id}",
            post(purchase_credit_package).delete(delete_credit_package),
        )
}
