//! Repositorio de vehículos

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Vehicle, VehicleType};
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// Búsqueda con filtros en SQL (antes se filtraba en memoria por pantalla)
    pub async fn search(
        &self,
        status: Option<&str>,
        term: Option<&str>,
    ) -> Result<Vec<Vehicle>, AppError> {
        let pattern = term.map(|t| format!("%{}%", t));
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::text IS NULL OR LOWER(status) = LOWER($1))
              AND ($2::text IS NULL OR make ILIKE $2 OR model ILIKE $2 OR license_plate ILIKE $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// Tabla de referencia para el selector de tipo
    pub async fn find_types(&self) -> Result<Vec<VehicleType>, AppError> {
        let types = sqlx::query_as::<_, VehicleType>(
            "SELECT * FROM vehicle_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        make: Option<String>,
        model: Option<String>,
        year: Option<i32>,
        license_plate: Option<String>,
        status: Option<String>,
        is_active: Option<bool>,
        daily_rate: Option<rust_decimal::Decimal>,
        vehicle_type_id: Option<Uuid>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, make, model, year, license_plate, status, is_active, daily_rate, vehicle_type_id, created_at)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'available'), COALESCE($7, true), $8, $9, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(make)
        .bind(model)
        .bind(year)
        .bind(license_plate)
        .bind(status)
        .bind(is_active)
        .bind(daily_rate)
        .bind(vehicle_type_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        make: Option<String>,
        model: Option<String>,
        year: Option<i32>,
        license_plate: Option<String>,
        status: Option<String>,
        is_active: Option<bool>,
        daily_rate: Option<rust_decimal::Decimal>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles SET
                make = COALESCE($2, make),
                model = COALESCE($3, model),
                year = COALESCE($4, year),
                license_plate = COALESCE($5, license_plate),
                status = COALESCE($6, status),
                is_active = COALESCE($7, is_active),
                daily_rate = COALESCE($8, daily_rate)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(make)
        .bind(model)
        .bind(year)
        .bind(license_plate)
        .bind(status)
        .bind(is_active)
        .bind(daily_rate)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle)
    }

    pub async fn set_photo_url(&self, id: Uuid, photo_url: &str) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET photo_url = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(photo_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }
        Ok(())
    }
}
