use crate::cache::{keys, FetchError, ReadThroughCache};
use crate::dto::booking_dto::{BookingListQuery, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::dto::common_dto::{ApiResponse, CachedResponse};
use crate::models::Booking;
use crate::repositories::booking_repository::BookingRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub struct BookingController {
    repository: BookingRepository,
    cache: ReadThroughCache,
    pool: sqlx::PgPool,
}

impl BookingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: BookingRepository::new(state.pool.clone()),
            cache: state.cache.clone(),
            pool: state.pool.clone(),
        }
    }

    pub async fn list(
        &self,
        query: BookingListQuery,
    ) -> Result<CachedResponse<Vec<Booking>>, AppError> {
        if query.status.is_some() || query.vehicle_id.is_some() {
            let bookings = self
                .repository
                .search(query.status.as_deref(), query.vehicle_id)
                .await?;
            return Ok(CachedResponse {
                success: true,
                from_cache: false,
                is_refreshing: false,
                data: Some(bookings),
                message: None,
            });
        }

        let pool = self.pool.clone();
        let snapshot = self
            .cache
            .get(keys::bookings(), move || {
                let pool = pool.clone();
                async move {
                    BookingRepository::new(pool)
                        .find_all()
                        .await
                        .map_err(FetchError::from)
                }
            })
            .await;
        Ok(CachedResponse::from_snapshot(snapshot))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Booking, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))
    }

    pub async fn create(
        &self,
        staff_id: Uuid,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<Booking>, AppError> {
        let booking = self
            .repository
            .create(
                request.vehicle_id,
                request.user_id,
                request.status,
                request.start_date,
                request.end_date,
                request.staff_id.or(Some(staff_id)),
            )
            .await?;

        self.invalidate_reads().await;
        Ok(ApiResponse::success_with_message(
            booking,
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<Booking>, AppError> {
        if request.status.trim().is_empty() {
            return Err(AppError::BadRequest("status es requerido".to_string()));
        }
        let booking = self.repository.update_status(id, &request.status).await?;

        self.invalidate_reads().await;
        Ok(ApiResponse::success(booking))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        self.invalidate_reads().await;
        Ok(())
    }

    async fn invalidate_reads(&self) {
        self.cache.invalidate(keys::bookings()).await;
        self.cache.invalidate(keys::dashboard()).await;
    }
}
