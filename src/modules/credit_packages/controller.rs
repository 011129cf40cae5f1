use axum::extract::{Path, State};
use livefit_core::validation::INVALID_ID;
use livefit_core::{ApiResponse, AppError, NullData};
use livefit_models::{CreateCreditPackageDto, CreditPackage, CreditPackageSummary};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_path_id};

use super::service::CreditPackageService;

#[utoipa::path(
    get,
    path = "/api/credit-package",
    responses(
        (status = 200, description = "All credit packages", body = Vec<CreditPackageSummary>)
    ),
    tag = "Credit Packages"
)]
#[instrument(skip(state))]
pub async fn get_credit_packages(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<CreditPackageSummary>>, AppError> {
    let packages = CreditPackageService::get_packages(&state.db).await?;
    Ok(ApiResponse::success(packages))
}

#[utoipa::path(
    post,
    path = "/api/credit-package",
    request_body = CreateCreditPackageDto,
    responses(
        (status = 200, description = "Credit package created", body = CreditPackage),
        (status = 400, description = "Invalid field values", body = ErrorResponse),
        (status = 409, description = "Duplicate data", body = ErrorResponse)
    ),
    tag = "Credit Packages"
)]
#[instrument(skip(state, dto))]
pub async fn create_credit_package(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCreditPackageDto>,
) -> Result<ApiResponse<CreditPackage>, AppError> {
    let package = CreditPackageService::create_package(&state.db, dto).await?;
    Ok(ApiResponse::success(package))
}

/// Buy a credit package for the current user
#[utoipa::path(
    post,
    path = "/api/credit-package/{credit_package_id}",
    params(("credit_package_id" = String, Path, description = "Credit package ID (UUID)")),
    responses(
        (status = 200, description = "Package purchased"),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Credit Packages"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn purchase_credit_package(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(credit_package_id): Path<String>,
) -> Result<NullData, AppError> {
    let package_id = parse_path_id(&credit_package_id, INVALID_ID)?;
    CreditPackageService::purchase(&state.db, auth_user.id(), package_id).await?;
    Ok(NullData::new())
}

#[utoipa::path(
    delete,
    path = "/api/credit-package/{credit_package_id}",
    params(("credit_package_id" = String, Path, description = "Credit package ID (UUID)")),
    responses(
        (status = 200, description = "Credit package deleted"),
        (status = 400, description = "Invalid ID", body = ErrorResponse)
    ),
    tag = "Credit Packages"
)]
#[instrument(skip(state))]
pub async fn delete_credit_package(
    State(state): State<AppState>,
    Path(credit_package_id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let package_id = parse_path_id(&credit_package_id, INVALID_ID)?;
    CreditPackageService::delete_package(&state.db, package_id).await?;
    Ok(ApiResponse::ok())
}
