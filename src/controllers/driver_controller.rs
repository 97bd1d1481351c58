use crate::cache::{keys, FetchError, ReadThroughCache};
use crate::clients::ObjectStorage;
use crate::dto::common_dto::{ApiResponse, CachedResponse};
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverStatusRequest};
use crate::models::Driver;
use crate::repositories::driver_repository::DriverRepository;
use crate::services::registration_service::decode_document;
use crate::state::AppState;
use crate::utils::errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct DriverController {
    repository: DriverRepository,
    cache: ReadThroughCache,
    storage: Arc<dyn ObjectStorage>,
    pool: sqlx::PgPool,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: DriverRepository::new(state.pool.clone()),
            cache: state.cache.clone(),
            storage: Arc::clone(&state.storage),
            pool: state.pool.clone(),
        }
    }

    pub async fn list(&self) -> Result<CachedResponse<Vec<Driver>>, AppError> {
        let pool = self.pool.clone();
        let snapshot = self
            .cache
            .get(keys::drivers(), move || {
                let pool = pool.clone();
                async move {
                    DriverRepository::new(pool)
                        .find_all()
                        .await
                        .map_err(FetchError::from)
                }
            })
            .await;
        Ok(CachedResponse::from_snapshot(snapshot))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Driver, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))
    }

    /// Alta manual por staff; la foto de licencia se sube antes del insert
    pub async fn create(
        &self,
        request: CreateDriverRequest,
    ) -> Result<ApiResponse<Driver>, AppError> {
        let license_photo_url = match &request.license_photo_base64 {
            Some(encoded) => {
                let bytes = decode_document(encoded)?;
                let path = format!("drivers/manual/{}.jpg", Uuid::new_v4());
                Some(self.storage.upload(&path, bytes, "image/jpeg").await?)
            }
            None => None,
        };

        let driver = self
            .repository
            .create(
                request.user_id,
                request.full_name,
                request.email,
                request.phone,
                request.license_number,
                request.license_expiry,
                license_photo_url,
            )
            .await?;

        self.cache.invalidate(keys::drivers()).await;
        Ok(ApiResponse::success_with_message(
            driver,
            "Conductor creado exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateDriverStatusRequest,
    ) -> Result<ApiResponse<Driver>, AppError> {
        if request.status.trim().is_empty() {
            return Err(AppError::BadRequest("status es requerido".to_string()));
        }
        let driver = self.repository.update_status(id, &request.status).await?;

        self.cache.invalidate(keys::drivers()).await;
        Ok(ApiResponse::success(driver))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        self.cache.invalidate(keys::drivers()).await;
        Ok(())
    }
}
