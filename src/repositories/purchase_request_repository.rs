//! Repositorio de solicitudes de compra

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{PurchaseRequest, PurchaseRequestStatus};
use crate::utils::errors::AppError;

pub struct PurchaseRequestRepository {
    pool: PgPool,
}

impl PurchaseRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<PurchaseRequest>, AppError> {
        let requests = sqlx::query_as::<_, PurchaseRequest>(
            "SELECT * FROM purchase_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn find_by_status(
        &self,
        status: PurchaseRequestStatus,
    ) -> Result<Vec<PurchaseRequest>, AppError> {
        let requests = sqlx::query_as::<_, PurchaseRequest>(
            "SELECT * FROM purchase_requests WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PurchaseRequest>, AppError> {
        let request = sqlx::query_as::<_, PurchaseRequest>(
            "SELECT * FROM purchase_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// El total se calcula acá y nunca se vuelve a escribir en updates
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        item_name: String,
        quantity: i32,
        unit_price: Decimal,
        tax: Decimal,
        shipping_cost: Decimal,
        supplier_id: Option<Uuid>,
        requested_by: Option<Uuid>,
        notes: Option<String>,
    ) -> Result<PurchaseRequest, AppError> {
        let total = PurchaseRequest::compute_total(quantity, unit_price, tax, shipping_cost);

        let request = sqlx::query_as::<_, PurchaseRequest>(
            r#"
            INSERT INTO purchase_requests
                (id, item_name, quantity, unit_price, tax, shipping_cost, total_amount,
                 status, supplier_id, requested_by, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'PENDING', $8, $9, $10, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(item_name)
        .bind(quantity)
        .bind(unit_price)
        .bind(tax)
        .bind(shipping_cost)
        .bind(total)
        .bind(supplier_id)
        .bind(requested_by)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    /// Persiste el estado y los campos de ciclo de vida ya mutados en memoria.
    /// No toca quantity/unit_price/tax/shipping_cost/total_amount.
    pub async fn save_transition(&self, request: &PurchaseRequest) -> Result<PurchaseRequest, AppError> {
        let saved = sqlx::query_as::<_, PurchaseRequest>(
            r#"
            UPDATE purchase_requests SET
                status = $2,
                verified_by = $3,
                verified_at = $4,
                rejected_by = $5,
                rejected_at = $6,
                rejection_reason = $7,
                completed_by = $8,
                completed_at = $9,
                received_date = $10,
                completion_notes = $11,
                completion_photo_url = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(request.id)
        .bind(&request.status)
        .bind(request.verified_by)
        .bind(request.verified_at)
        .bind(request.rejected_by)
        .bind(request.rejected_at)
        .bind(&request.rejection_reason)
        .bind(request.completed_by)
        .bind(request.completed_at)
        .bind(request.received_date)
        .bind(&request.completion_notes)
        .bind(&request.completion_photo_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Solicitud de compra no encontrada".to_string()))?;

        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM purchase_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Solicitud de compra no encontrada".to_string(),
            ));
        }
        Ok(())
    }
}
