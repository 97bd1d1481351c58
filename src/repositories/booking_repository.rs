//! Repositorio de reservas

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Booking;
use crate::utils::errors::AppError;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn search(
        &self,
        status: Option<&str>,
        vehicle_id: Option<Uuid>,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE ($1::text IS NULL OR LOWER(status) = LOWER($1))
              AND ($2::uuid IS NULL OR vehicle_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn create(
        &self,
        vehicle_id: Option<Uuid>,
        user_id: Option<Uuid>,
        status: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        staff_id: Option<Uuid>,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, vehicle_id, user_id, status, start_date, end_date, staff_id, created_at)
            VALUES ($1, $2, $3, COALESCE($4, 'pending'), $5, $6, $7, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(user_id)
        .bind(status)
        .bind(start_date)
        .bind(end_date)
        .bind(staff_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(booking)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Reserva no encontrada".to_string()));
        }
        Ok(())
    }

    /// Conteo de filas de una tabla de servicio extra (handling, baggage,
    /// airport transfer); solo se consume el total
    pub async fn count_service_table(&self, table: ServiceTable) -> Result<u64, AppError> {
        let query = match table {
            ServiceTable::Handling => "SELECT COUNT(*) FROM handling_bookings",
            ServiceTable::Baggage => "SELECT COUNT(*) FROM baggage_bookings",
            ServiceTable::AirportTransfer => "SELECT COUNT(*) FROM airport_transfer_bookings",
        };
        let count: (i64,) = sqlx::query_as(query).fetch_one(&self.pool).await?;
        Ok(count.0 as u64)
    }
}

/// Tablas de servicios extra con nombre fijo (nunca interpoladas de input)
#[derive(Debug, Clone, Copy)]
pub enum ServiceTable {
    Handling,
    Baggage,
    AirportTransfer,
}
