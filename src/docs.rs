use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use livefit_core::{PageQuery, PaginationMeta};
use livefit_models::{
    BookedCourse, ChangePasswordDto, Coach, CoachCourseItem, CoachListItem, CoachProfileDto,
    CoachUserInfo, CoachWithUser, Course, CourseDto, CourseListItem, CourseResponse,
    CreateCreditPackageDto, CreateSkillDto, CreditPackage, CreditPackageSummary, LoginDto,
    LoginResponse, LoginUser, OwnedCourseItem, ProfileResponse, PurchaseHistoryItem, SignupDto,
    SignupResponse, SignupUser, Skill, SkillSummary, UpdateProfileDto, UploadResponse,
    UserCoursesResponse, UserRole,
};

use crate::modules::health::controller::HealthResponse;

/// Body of every 4xx and 5xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// `failed` for client errors, `error` for server errors
    #[schema(example = "failed")]
    pub status: String,
    #[schema(example = "Invalid field values")]
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::users::controller::signup,
        crate::modules::users::controller::login,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::change_password,
        crate::modules::users::controller::get_credit_packages,
        crate::modules::users::controller::get_my_courses,
        crate::modules::coaches::controller::get_coaches,
        crate::modules::coaches::controller::get_coach,
        crate::modules::coaches::controller::get_coach_courses,
        crate::modules::admin::controller::promote_to_coach,
        crate::modules::admin::controller::update_coach_profile,
        crate::modules::admin::controller::create_course,
        crate::modules::admin::controller::update_course,
        crate::modules::admin::controller::get_own_courses,
        crate::modules::admin::controller::get_own_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::book_course,
        crate::modules::courses::controller::cancel_booking,
        crate::modules::skills::controller::get_skills,
        crate::modules::skills::controller::create_skill,
        crate::modules::skills::controller::delete_skill,
        crate::modules::credit_packages::controller::get_credit_packages,
        crate::modules::credit_packages::controller::create_credit_package,
        crate::modules::credit_packages::controller::purchase_credit_package,
        crate::modules::credit_packages::controller::delete_credit_package,
        crate::modules::uploads::controller::upload_image,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            PageQuery,
            PaginationMeta,
            UserRole,
            SignupDto,
            SignupUser,
            SignupResponse,
            LoginDto,
            LoginUser,
            LoginResponse,
            ProfileResponse,
            UpdateProfileDto,
            ChangePasswordDto,
            PurchaseHistoryItem,
            UserCoursesResponse,
            BookedCourse,
            Coach,
            CoachListItem,
            CoachUserInfo,
            CoachWithUser,
            CoachProfileDto,
            CoachCourseItem,
            Course,
            CourseDto,
            CourseResponse,
            CourseListItem,
            OwnedCourseItem,
            Skill,
            SkillSummary,
            CreateSkillDto,
            CreditPackage,
            CreditPackageSummary,
            CreateCreditPackageDto,
            UploadResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Users", description = "Accounts, profile, credits and bookings of the current user"),
        (name = "Coaches", description = "Public coach directory"),
        (name = "Admin", description = "Coach promotion and coach-only course management"),
        (name = "Courses", description = "Course listing and booking"),
        (name = "Skills", description = "Skill catalogue"),
        (name = "Credit Packages", description = "Credit packages and purchases"),
        (name = "Uploads", description = "Image upload")
    ),
    info(
        title = "LiveFit API",
        version = "0.1.0",
        description = "Course booking backend for live online fitness classes, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
