use crate::cache::{keys, FetchError, ReadThroughCache};
use crate::dto::common_dto::{ApiResponse, CachedResponse};
use crate::dto::payment_dto::{CreatePaymentRequest, UpdatePaymentStatusRequest};
use crate::models::Payment;
use crate::repositories::payment_repository::PaymentRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use rust_decimal::Decimal;
use uuid::Uuid;

pub struct PaymentController {
    repository: PaymentRepository,
    cache: ReadThroughCache,
    pool: sqlx::PgPool,
}

impl PaymentController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: PaymentRepository::new(state.pool.clone()),
            cache: state.cache.clone(),
            pool: state.pool.clone(),
        }
    }

    pub async fn list(&self) -> Result<CachedResponse<Vec<Payment>>, AppError> {
        let pool = self.pool.clone();
        let snapshot = self
            .cache
            .get(keys::payments(), move || {
                let pool = pool.clone();
                async move {
                    PaymentRepository::new(pool)
                        .find_all()
                        .await
                        .map_err(FetchError::from)
                }
            })
            .await;
        Ok(CachedResponse::from_snapshot(snapshot))
    }

    pub async fn list_by_booking(&self, booking_id: Uuid) -> Result<Vec<Payment>, AppError> {
        self.repository.find_by_booking(booking_id).await
    }

    pub async fn create(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<ApiResponse<Payment>, AppError> {
        if request.amount < Decimal::ZERO {
            return Err(AppError::BadRequest("amount no puede ser negativo".to_string()));
        }

        let payment = self
            .repository
            .create(request.booking_id, request.amount, request.status, request.payment_method)
            .await?;

        self.invalidate_reads().await;
        Ok(ApiResponse::success_with_message(
            payment,
            "Pago registrado exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdatePaymentStatusRequest,
    ) -> Result<ApiResponse<Payment>, AppError> {
        if request.status.trim().is_empty() {
            return Err(AppError::BadRequest("status es requerido".to_string()));
        }
        let payment = self.repository.update_status(id, &request.status).await?;

        self.invalidate_reads().await;
        Ok(ApiResponse::success(payment))
    }

    async fn invalidate_reads(&self) {
        self.cache.invalidate(keys::payments()).await;
        self.cache.invalidate(keys::dashboard()).await;
    }
}
