use crate::cache::{keys, FetchError, ReadThroughCache};
use crate::clients::ObjectStorage;
use crate::dto::common_dto::{ApiResponse, CachedResponse};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleListQuery};
use crate::models::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::registration_service::decode_document;
use crate::state::AppState;
use crate::utils::errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct VehicleController {
    repository: VehicleRepository,
    cache: ReadThroughCache,
    storage: Arc<dyn ObjectStorage>,
    pool: sqlx::PgPool,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: VehicleRepository::new(state.pool.clone()),
            cache: state.cache.clone(),
            storage: Arc::clone(&state.storage),
            pool: state.pool.clone(),
        }
    }

    /// Listado base servido por el cache; la lista filtrada va directa a SQL
    pub async fn list(&self, query: VehicleListQuery) -> Result<CachedResponse<Vec<Vehicle>>, AppError> {
        if query.status.is_some() || query.q.is_some() {
            let vehicles = self
                .repository
                .search(query.status.as_deref(), query.q.as_deref())
                .await?;
            return Ok(CachedResponse {
                success: true,
                from_cache: false,
                is_refreshing: false,
                data: Some(vehicles),
                message: None,
            });
        }

        let pool = self.pool.clone();
        let snapshot = self
            .cache
            .get(keys::vehicles(), move || {
                let pool = pool.clone();
                async move {
                    VehicleRepository::new(pool)
                        .find_all()
                        .await
                        .map_err(FetchError::from)
                }
            })
            .await;
        Ok(CachedResponse::from_snapshot(snapshot))
    }

    pub async fn list_types(&self) -> Result<Vec<crate::models::VehicleType>, AppError> {
        self.repository.find_types().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        let vehicle = self
            .repository
            .create(
                request.make,
                request.model,
                request.year,
                request.license_plate,
                request.status,
                request.is_active,
                request.daily_rate,
                request.vehicle_type_id,
            )
            .await?;

        self.invalidate_reads().await;
        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        let vehicle = self
            .repository
            .update(
                id,
                request.make,
                request.model,
                request.year,
                request.license_plate,
                request.status,
                request.is_active,
                request.daily_rate,
            )
            .await?;

        self.invalidate_reads().await;
        Ok(ApiResponse::success(vehicle))
    }

    /// Subir la foto del vehículo y recién después persistir la URL
    pub async fn upload_photo(
        &self,
        id: Uuid,
        photo_base64: &str,
        content_type: Option<&str>,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        // El vehículo tiene que existir antes de gastar el upload
        self.get_by_id(id).await?;

        let bytes = decode_document(photo_base64)?;
        let path = format!("vehicles/{}/photo.jpg", id);
        let url = self
            .storage
            .upload(&path, bytes, content_type.unwrap_or("image/jpeg"))
            .await?;

        let vehicle = self.repository.set_photo_url(id, &url).await?;
        self.invalidate_reads().await;
        Ok(ApiResponse::success(vehicle))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        self.invalidate_reads().await;
        Ok(())
    }

    async fn invalidate_reads(&self) {
        self.cache.invalidate(keys::vehicles()).await;
        self.cache.invalidate(keys::dashboard()).await;
    }
}
