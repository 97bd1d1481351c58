use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::purchase_request_dto::{
    CompletePurchaseRequestRequest, CreatePurchaseRequestRequest, PurchaseRequestListQuery,
    RejectPurchaseRequestRequest,
};
use crate::models::{PurchaseRequest, PurchaseRequestStatus};
use crate::repositories::PurchaseRequestRepository;
use crate::services::purchase_request_service::{CompletionPhoto, PurchaseRequestService};
use crate::services::registration_service::decode_document;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub struct PurchaseRequestController {
    service: PurchaseRequestService,
}

impl PurchaseRequestController {
    pub fn new(state: &AppState) -> Self {
        let repository = PurchaseRequestRepository::new(state.pool.clone());
        let service = PurchaseRequestService::new(
            repository,
            std::sync::Arc::clone(&state.storage),
            state.cache.clone(),
        );
        Self { service }
    }

    pub async fn list(
        &self,
        query: PurchaseRequestListQuery,
    ) -> Result<Vec<PurchaseRequest>, AppError> {
        let status = match query.status.as_deref() {
            Some(raw) => Some(
                PurchaseRequestStatus::parse(raw)
                    .ok_or_else(|| AppError::BadRequest(format!("Estado desconocido: '{}'", raw)))?,
            ),
            None => None,
        };
        self.service.list(status).await
    }

    pub async fn create(
        &self,
        actor: Uuid,
        request: CreatePurchaseRequestRequest,
    ) -> Result<ApiResponse<PurchaseRequest>, AppError> {
        request.validate()?;

        let created = self
            .service
            .create(
                request.item_name,
                request.quantity,
                request.unit_price,
                request.tax,
                request.shipping_cost,
                request.supplier_id,
                Some(actor),
                request.notes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            created,
            "Solicitud de compra creada".to_string(),
        ))
    }

    pub async fn approve(
        &self,
        id: Uuid,
        actor: Uuid,
    ) -> Result<ApiResponse<PurchaseRequest>, AppError> {
        let approved = self.service.approve(id, actor).await?;
        Ok(ApiResponse::success(approved))
    }

    pub async fn reject(
        &self,
        id: Uuid,
        actor: Uuid,
        request: RejectPurchaseRequestRequest,
    ) -> Result<ApiResponse<PurchaseRequest>, AppError> {
        let rejected = self.service.reject(id, actor, request.reason).await?;
        Ok(ApiResponse::success(rejected))
    }

    pub async fn complete(
        &self,
        id: Uuid,
        actor: Uuid,
        request: CompletePurchaseRequestRequest,
    ) -> Result<ApiResponse<PurchaseRequest>, AppError> {
        let photo = match &request.photo_base64 {
            Some(encoded) => Some(CompletionPhoto {
                file_name: request
                    .photo_file_name
                    .clone()
                    .unwrap_or_else(|| "receipt.jpg".to_string()),
                bytes: decode_document(encoded)?,
                content_type: request
                    .photo_content_type
                    .clone()
                    .unwrap_or_else(|| "image/jpeg".to_string()),
            }),
            None => None,
        };

        let completed = self
            .service
            .complete(id, actor, request.received_date, request.notes, photo)
            .await?;
        Ok(ApiResponse::success(completed))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.service.delete(id).await
    }
}
