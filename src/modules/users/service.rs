use livefit_auth::create_access_token;
use livefit_config::JwtConfig;
use livefit_core::{AppError, hash_password, verify_password};
use livefit_db::unique_violation;
use livefit_models::{
    BookedCourse, BookingStatus, ChangePasswordDto, LoginDto, LoginResponse, LoginUser,
    PurchaseHistoryItem, SignupDto, SignupUser, User, UserCoursesResponse, UserRole,
};
use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

pub const EMAIL_IN_USE: &str = "Email already in use";
pub const BAD_CREDENTIALS: &str = "User not found or password incorrect";
pub const NAME_UNCHANGED: &str = "Name unchanged";
pub const UPDATE_USER_FAILED: &str = "Failed to update user";
pub const PASSWORD_UNCHANGED: &str = "New password must differ from the old password";
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match";
pub const PASSWORD_INCORRECT: &str = "Password incorrect";

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto), fields(user.email = %dto.email, db.operation = "INSERT", db.table = "users"))]
    pub async fn signup(db: &PgPool, dto: SignupDto) -> Result<SignupUser, AppError> {
        let taken = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(&dto.email)
            .fetch_one(db)
            .await?;
        if taken {
            warn!(user.email = %dto.email, "signup with an email already in use");
            return Err(AppError::conflict(anyhow::anyhow!(EMAIL_IN_USE)));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, SignupUser>(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(UserRole::User.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if unique_violation(&e).is_some() {
                warn!(user.email = %dto.email, "email taken between check and insert");
                return AppError::conflict(anyhow::anyhow!(EMAIL_IN_USE));
            }
            error!(error = %e, "Database error creating user");
            AppError::from(e)
        })?;

        info!(user.id = %user.id, "user signed up");
        Ok(user)
    }

    #[instrument(skip(db, jwt_config, dto), fields(user.email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginDto,
    ) -> Result<LoginResponse, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, role, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?;

        let Some(user) = user else {
            debug!("login for unknown email");
            return Err(AppError::failed(BAD_CREDENTIALS));
        };

        if !verify_password(&dto.password, &user.password)? {
            debug!(user.id = %user.id, "login with wrong password");
            return Err(AppError::failed(BAD_CREDENTIALS));
        }

        let token = create_access_token(user.id, &user.role, jwt_config)?;
        info!(user.id = %user.id, "user logged in");

        Ok(LoginResponse {
            token,
            user: LoginUser { name: user.name },
        })
    }

    #[instrument(skip(db, user), fields(user.id = %user.id, db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_profile(db: &PgPool, user: &User, name: String) -> Result<(), AppError> {
        if user.name == name {
            return Err(AppError::failed(NAME_UNCHANGED));
        }

        let result = sqlx::query("UPDATE users SET name = $1, updated_at = now() WHERE id = $2")
            .bind(&name)
            .bind(user.id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::failed(UPDATE_USER_FAILED));
        }

        info!("profile updated");
        Ok(())
    }

    #[instrument(skip(db, user, dto), fields(user.id = %user.id, db.operation = "UPDATE", db.table = "users"))]
    pub async fn change_password(
        db: &PgPool,
        user: &User,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        if dto.new_password == dto.password {
            return Err(AppError::failed(PASSWORD_UNCHANGED));
        }
        if dto.new_password != dto.confirm_new_password {
            return Err(AppError::failed(PASSWORDS_MISMATCH));
        }
        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::failed(PASSWORD_INCORRECT));
        }

        let password_hash = hash_password(&dto.new_password)?;
        let result = sqlx::query("UPDATE users SET password = $1, updated_at = now() WHERE id = $2")
            .bind(&password_hash)
            .bind(user.id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::failed(UPDATE_USER_FAILED));
        }

        info!("password changed");
        Ok(())
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "credit_purchases"))]
    pub async fn get_purchases(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<PurchaseHistoryItem>, AppError> {
        let purchases = sqlx::query_as::<_, PurchaseHistoryItem>(
            "SELECT cp.purchased_credits, cp.price_paid, pkg.name, cp.purchase_at
             FROM credit_purchases cp
             JOIN credit_packages pkg ON pkg.id = cp.credit_package_id
             WHERE cp.user_id = $1
             ORDER BY cp.purchase_at DESC",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(purchases)
    }

    /// Credit balance and the user's bookings, newest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "course_bookings"))]
    pub async fn get_courses(db: &PgPool, user_id: Uuid) -> Result<UserCoursesResponse, AppError> {
        let purchased = Self::purchased_credits(db, user_id).await?;

        let credit_usage = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM course_bookings
             WHERE user_id = $1 AND cancelled_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;

        let course_booking = sqlx::query_as::<_, BookedCourse>(
            "SELECT b.course_id, c.name, u.name AS coach_name, c.start_at, c.end_at,
                    c.meeting_url, b.status, b.booking_at
             FROM course_bookings b
             JOIN courses c ON c.id = b.course_id
             JOIN users u ON u.id = c.user_id
             WHERE b.user_id = $1 AND b.status <> $2
             ORDER BY b.booking_at DESC",
        )
        .bind(user_id)
        .bind(BookingStatus::Cancelled.as_str())
        .fetch_all(db)
        .await?;

        Ok(UserCoursesResponse {
            credit_remain: (purchased - credit_usage).max(0),
            credit_usage,
            course_booking,
        })
    }

    pub async fn purchased_credits<'e, E>(executor: E, user_id: Uuid) -> Result<i64, AppError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(purchased_credits), 0)::BIGINT
             FROM credit_purchases WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }
}
