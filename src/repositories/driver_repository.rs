//! Repositorio de conductores

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Driver;
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Option<Uuid>,
        full_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        license_number: Option<String>,
        license_expiry: Option<NaiveDate>,
        license_photo_url: Option<String>,
    ) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, user_id, full_name, email, phone, license_number, license_expiry, license_photo_url, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'active', NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(license_number)
        .bind(license_expiry)
        .bind(license_photo_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            "UPDATE drivers SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(driver)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Conductor no encontrado".to_string()));
        }
        Ok(())
    }
}
