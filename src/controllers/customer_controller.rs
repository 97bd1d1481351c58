use crate::cache::{keys, FetchError, ReadThroughCache};
use crate::clients::ObjectStorage;
use crate::dto::common_dto::{ApiResponse, CachedResponse};
use crate::dto::customer_dto::{CreateCustomerRequest, CustomerSearchQuery, UpdateCustomerRequest};
use crate::models::Customer;
use crate::repositories::customer_repository::CustomerRepository;
use crate::services::registration_service::decode_document;
use crate::state::AppState;
use crate::utils::errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct CustomerController {
    repository: CustomerRepository,
    cache: ReadThroughCache,
    storage: Arc<dyn ObjectStorage>,
    pool: sqlx::PgPool,
}

impl CustomerController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: CustomerRepository::new(state.pool.clone()),
            cache: state.cache.clone(),
            storage: Arc::clone(&state.storage),
            pool: state.pool.clone(),
        }
    }

    pub async fn list(
        &self,
        query: CustomerSearchQuery,
    ) -> Result<CachedResponse<Vec<Customer>>, AppError> {
        if let Some(term) = query.q.as_deref().filter(|q| !q.trim().is_empty()) {
            let customers = self.repository.search(term).await?;
            return Ok(CachedResponse {
                success: true,
                from_cache: false,
                is_refreshing: false,
                data: Some(customers),
                message: None,
            });
        }

        let pool = self.pool.clone();
        let snapshot = self
            .cache
            .get(keys::customers(), move || {
                let pool = pool.clone();
                async move {
                    CustomerRepository::new(pool)
                        .find_all()
                        .await
                        .map_err(FetchError::from)
                }
            })
            .await;
        Ok(CachedResponse::from_snapshot(snapshot))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Customer, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))
    }

    /// Alta manual por staff; el documento se sube antes del insert
    pub async fn create(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<ApiResponse<Customer>, AppError> {
        let id_document_url = match &request.id_document_base64 {
            Some(encoded) => {
                let bytes = decode_document(encoded)?;
                let path = format!("customers/manual/{}.jpg", Uuid::new_v4());
                Some(self.storage.upload(&path, bytes, "image/jpeg").await?)
            }
            None => None,
        };

        let customer = self
            .repository
            .create(
                request.user_id,
                request.full_name,
                request.email,
                request.phone,
                request.address,
                id_document_url,
            )
            .await?;

        self.invalidate_reads().await;
        Ok(ApiResponse::success_with_message(
            customer,
            "Cliente creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCustomerRequest,
    ) -> Result<ApiResponse<Customer>, AppError> {
        let customer = self
            .repository
            .update(id, request.full_name, request.email, request.phone, request.address)
            .await?;

        self.invalidate_reads().await;
        Ok(ApiResponse::success(customer))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        self.invalidate_reads().await;
        Ok(())
    }

    async fn invalidate_reads(&self) {
        self.cache.invalidate(keys::customers()).await;
        self.cache.invalidate(keys::dashboard()).await;
    }
}
