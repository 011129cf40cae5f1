use livefit_core::AppError;
use livefit_core::validation::{DUPLICATE_DATA, INVALID_ID, STILL_IN_USE};
use livefit_db::{is_foreign_key_violation, unique_violation};
use livefit_models::{CreateCreditPackageDto, CreditPackage, CreditPackageSummary, CreditPurchase};
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub struct CreditPackageService;

impl CreditPackageService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "credit_packages"))]
    pub async fn get_packages(db: &PgPool) -> Result<Vec<CreditPackageSummary>, AppError> {
        let packages = sqlx::query_as::<_, CreditPackageSummary>(
            "SELECT id, name, credit_amount, price FROM credit_packages ORDER BY created_at",
        )
        .fetch_all(db)
        .await?;

        Ok(packages)
    }

    #[instrument(skip(db, dto), fields(package.name = %dto.name, db.operation = "INSERT", db.table = "credit_packages"))]
    pub async fn create_package(
        db: &PgPool,
        dto: CreateCreditPackageDto,
    ) -> Result<CreditPackage, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM credit_packages WHERE name = $1)",
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await?;
        if exists {
            warn!("duplicate credit package name");
            return Err(AppError::conflict(anyhow::anyhow!(DUPLICATE_DATA)));
        }

        let package = sqlx::query_as::<_, CreditPackage>(
            "INSERT INTO credit_packages (name, credit_amount, price)
             VALUES ($1, $2, $3)
             RETURNING id, name, credit_amount, price, created_at",
        )
        .bind(&dto.name)
        .bind(dto.credit_amount)
        .bind(dto.price)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if unique_violation(&e).is_some() {
                return AppError::conflict(anyhow::anyhow!(DUPLICATE_DATA));
            }
            AppError::from(e)
        })?;

        info!(package.id = %package.id, "credit package created");
        Ok(package)
    }

    /// Records a purchase, copying credits and price from the package as they are now.
    #[instrument(skip(db), fields(db.operation = "INSERT", db.table = "credit_purchases"))]
    pub async fn purchase(
        db: &PgPool,
        user_id: Uuid,
        package_id: Uuid,
    ) -> Result<CreditPurchase, AppError> {
        let purchase = sqlx::query_as::<_, CreditPurchase>(
            "INSERT INTO credit_purchases
                (user_id, credit_package_id, purchased_credits, price_paid, purchase_at)
             SELECT $1, id, credit_amount, price, now()
             FROM credit_packages WHERE id = $2
             RETURNING id, user_id, credit_package_id, purchased_credits, price_paid,
                       purchase_at, created_at",
        )
        .bind(user_id)
        .bind(package_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::failed(INVALID_ID))?;

        info!(purchase.id = %purchase.id, credits = purchase.purchased_credits, "credits purchased");
        Ok(purchase)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "credit_packages"))]
    pub async fn delete_package(db: &PgPool, package_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM credit_packages WHERE id = $1")
            .bind(package_id)
            .execute(db)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    warn!("delete refused, rows still reference it");
                    return AppError::conflict(anyhow::anyhow!(STILL_IN_USE));
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::failed(INVALID_ID));
        }

        info!("credit package deleted");
        Ok(())
    }
}
