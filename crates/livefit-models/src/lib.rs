//! # LiveFit Models
//!
//! Domain models and DTOs for the LiveFit API.
//!
//! Row types derive `sqlx::FromRow` and map one-to-one onto the tables in
//! `migrations/`. Request DTOs derive `validator::Validate` with the shared
//! validators from `livefit_core::validation`, so every field error carries
//! the message the client sees.
//!
//! - [`users`]: Accounts, signup/login and profile DTOs
//! - [`coaches`]: Coach profiles
//! - [`skills`]: Skill catalogue
//! - [`courses`]: Courses and the course DTO shared by create and update
//! - [`bookings`]: Course bookings and the user's booking summary
//! - [`credit_packages`]: Credit packages and purchases
//! - [`uploads`]: Image upload response

pub mod bookings;
pub mod coaches;
pub mod courses;
pub mod credit_packages;
pub mod skills;
pub mod uploads;
pub mod users;

pub use bookings::{BookedCourse, BookingStatus, CourseBooking, UserCoursesResponse};
pub use coaches::{Coach, CoachListItem, CoachProfileDto, CoachUserInfo, CoachWithUser};
pub use courses::{CoachCourseItem, Course, CourseDto, CourseListItem, CourseResponse, OwnedCourseItem};
pub use credit_packages::{
    CreateCreditPackageDto, CreditPackage, CreditPackageSummary, CreditPurchase,
    PurchaseHistoryItem,
};
pub use skills::{CreateSkillDto, Skill, SkillSummary};
pub use uploads::UploadResponse;
pub use users::{
    ChangePasswordDto, LoginDto, LoginResponse, LoginUser, ProfileResponse, SignupDto,
    SignupResponse, SignupUser, UpdateProfileDto, User, UserRole,
};
