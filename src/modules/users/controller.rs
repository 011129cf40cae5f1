use axum::extract::State;
use livefit_core::{ApiResponse, AppError, Created};
use livefit_models::{
    ChangePasswordDto, LoginDto, LoginResponse, ProfileResponse, PurchaseHistoryItem, SignupDto,
    SignupResponse, UpdateProfileDto, UserCoursesResponse,
};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/users/signup",
    request_body = SignupDto,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Invalid field values", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupDto>,
) -> Result<Created<SignupResponse>, AppError> {
    let user = UserService::signup(&state.db, dto).await?;
    Ok(Created(SignupResponse { user }))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginDto,
    responses(
        (status = 201, description = "Logged in", body = LoginResponse),
        (status = 400, description = "User not found or password incorrect", body = ErrorResponse),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Created<LoginResponse>, AppError> {
    let response = UserService::login(&state.db, &state.jwt_config, dto).await?;
    Ok(Created(response))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "User profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(auth_user), fields(user.id = %auth_user.id()))]
pub async fn get_profile(auth_user: AuthUser) -> Result<ApiResponse<ProfileResponse>, AppError> {
    let AuthUser(user) = auth_user;
    Ok(ApiResponse::success(ProfileResponse {
        email: user.email,
        name: user.name,
    }))
}

/// Change the current user's display name
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "Invalid name or name unchanged", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<ApiResponse<()>, AppError> {
    UserService::update_profile(&state.db, &auth_user.0, dto.name).await?;
    Ok(ApiResponse::ok())
}

/// Change the current user's password
#[utoipa::path(
    put,
    path = "/api/users/password",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Invalid fields or password mismatch", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<ApiResponse<()>, AppError> {
    UserService::change_password(&state.db, &auth_user.0, dto).await?;
    Ok(ApiResponse::ok())
}

/// List the current user's credit purchases, newest first
#[utoipa::path(
    get,
    path = "/api/users/credit-package",
    responses(
        (status = 200, description = "Purchase history", body = Vec<PurchaseHistoryItem>),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn get_credit_packages(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<Vec<PurchaseHistoryItem>>, AppError> {
    let purchases = UserService::get_purchases(&state.db, auth_user.id()).await?;
    Ok(ApiResponse::success(purchases))
}

/// Credit balance and booked courses of the current user
#[utoipa::path(
    get,
    path = "/api/users/courses",
    responses(
        (status = 200, description = "Credits and bookings", body = UserCoursesResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn get_my_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<UserCoursesResponse>, AppError> {
    let courses = UserService::get_courses(&state.db, auth_user.id()).await?;
    Ok(ApiResponse::success(courses))
}
