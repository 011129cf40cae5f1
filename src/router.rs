use std::any::Any;

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, middleware, routing::get};
use livefit_config::CorsConfig;
use livefit_core::AppError;
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::admin::router::init_admin_router;
use crate::modules::coaches::router::init_coaches_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::credit_packages::router::init_credit_packages_router;
use crate::modules::health::controller::health_check;
use crate::modules::skills::router::init_skills_router;
use crate::modules::uploads::router::init_uploads_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub const ROUTE_NOT_FOUND: &str = "Route not found";

pub fn init_router(state: AppState) -> anyhow::Result<Router> {
    let api = Router::new()
        .nest("/users", init_users_router(&state)?)
        .nest("/coaches", init_coaches_router())
        .nest("/admin", init_admin_router())
        .nest("/courses", init_courses_router())
        .nest("/skill", init_skills_router())
        .nest("/credit-package", init_credit_packages_router())
        .nest("/upload", init_uploads_router());

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health_check))
        .nest("/api", api);

    if let Some(dir) = &state.upload_dir {
        router = router.nest_service("/uploads", ServeDir::new(dir));
    }

    Ok(router
        .fallback(route_not_found)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(logging_middleware)))
}

async fn route_not_found() -> Response {
    let body = Json(json!({
        "status": "error",
        "message": ROUTE_NOT_FOUND,
    }));
    (StatusCode::NOT_FOUND, body).into_response()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    AppError::internal_error(format!("handler panicked: {detail}")).into_response()
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    // credentials cannot be combined with a wildcard origin
    if config.allows_any() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer
        .allow_origin(allowed_origins)
        .allow_credentials(true)
}
