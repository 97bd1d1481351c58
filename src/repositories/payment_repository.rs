//! Repositorio de pagos

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Payment;
use crate::utils::errors::AppError;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn find_by_booking(&self, booking_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE booking_id = $1 ORDER BY created_at DESC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn create(
        &self,
        booking_id: Option<Uuid>,
        amount: Decimal,
        status: Option<String>,
        payment_method: Option<String>,
    ) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, booking_id, amount, status, payment_method, created_at)
            VALUES ($1, $2, $3, COALESCE($4, 'Unpaid'), $5, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(amount)
        .bind(status)
        .bind(payment_method)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            "UPDATE payments SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Pago no encontrado".to_string()))?;

        Ok(payment)
    }
}
