//! Servicio de solicitudes de compra
//!
//! Orquesta la máquina de estados del modelo contra el repositorio, el
//! storage y el cache. Regla de oro del cierre: la foto de evidencia se sube
//! ANTES de persistir la transición, así un upload fallido nunca deja una
//! solicitud marcada como completada.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::cache::{keys, ReadThroughCache};
use crate::clients::ObjectStorage;
use crate::models::{PurchaseRequest, PurchaseRequestStatus};
use crate::repositories::PurchaseRequestRepository;
use crate::utils::errors::{invalid_state_error, AppError};

/// Evidencia fotográfica adjunta al cierre de una solicitud
pub struct CompletionPhoto {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

pub struct PurchaseRequestService {
    repository: PurchaseRequestRepository,
    storage: Arc<dyn ObjectStorage>,
    cache: ReadThroughCache,
}

impl PurchaseRequestService {
    pub fn new(
        repository: PurchaseRequestRepository,
        storage: Arc<dyn ObjectStorage>,
        cache: ReadThroughCache,
    ) -> Self {
        Self { repository, storage, cache }
    }

    pub async fn list(
        &self,
        status: Option<PurchaseRequestStatus>,
    ) -> Result<Vec<PurchaseRequest>, AppError> {
        match status {
            Some(status) => self.repository.find_by_status(status).await,
            None => self.repository.find_all().await,
        }
    }

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
        if quantity <= 0 {
            return Err(AppError::BadRequest("quantity debe ser positivo".to_string()));
        }
        if unit_price < Decimal::ZERO || tax < Decimal::ZERO || shipping_cost < Decimal::ZERO {
            return Err(AppError::BadRequest("Los importes no pueden ser negativos".to_string()));
        }

        let created = self
            .repository
            .create(item_name, quantity, unit_price, tax, shipping_cost, supplier_id, requested_by, notes)
            .await?;

        info!("💾 Solicitud de compra creada: {} (total {})", created.id, created.total_amount);
        self.cache.invalidate(keys::purchase_requests()).await;
        Ok(created)
    }

    pub async fn approve(&self, id: Uuid, actor: Uuid) -> Result<PurchaseRequest, AppError> {
        let mut request = self.load(id).await?;
        request.approve(actor, Utc::now())?;
        let saved = self.repository.save_transition(&request).await?;

        info!("✅ Solicitud {} aprobada por {}", id, actor);
        self.cache.invalidate(keys::purchase_requests()).await;
        Ok(saved)
    }

    pub async fn reject(
        &self,
        id: Uuid,
        actor: Uuid,
        reason: Option<String>,
    ) -> Result<PurchaseRequest, AppError> {
        let mut request = self.load(id).await?;
        request.reject(actor, Utc::now(), reason)?;
        let saved = self.repository.save_transition(&request).await?;

        info!("🗑️ Solicitud {} rechazada por {}", id, actor);
        self.cache.invalidate(keys::purchase_requests()).await;
        Ok(saved)
    }

    /// Cerrar una solicitud aprobada, con evidencia opcional
    pub async fn complete(
        &self,
        id: Uuid,
        actor: Uuid,
        received_date: NaiveDate,
        notes: Option<String>,
        photo: Option<CompletionPhoto>,
    ) -> Result<PurchaseRequest, AppError> {
        let mut request = self.load(id).await?;

        // Guard barato antes del upload: no subir evidencia de una
        // transición que va a fallar igual
        if !request.can_complete() {
            return Err(invalid_state_error(
                "complete",
                &request.status,
                PurchaseRequestStatus::Approved.as_str(),
            ));
        }

        let photo_url = match photo {
            Some(photo) => {
                let path = format!("purchase-requests/{}/{}", id, photo.file_name);
                Some(self.storage.upload(&path, photo.bytes, &photo.content_type).await?)
            }
            None => None,
        };

        request.complete(actor, Utc::now(), received_date, notes, photo_url)?;
        let saved = self.repository.save_transition(&request).await?;

        info!("✅ Solicitud {} completada por {}", id, actor);
        self.cache.invalidate(keys::purchase_requests()).await;
        self.cache.invalidate(keys::dashboard()).await;
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        self.cache.invalidate(keys::purchase_requests()).await;
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<PurchaseRequest, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Solicitud de compra no encontrada".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FailingStorage;

    #[async_trait]
    impl ObjectStorage for FailingStorage {
        async fn upload(
            &self,
            _path: &str,
            _bytes: Vec<u8>,
            _content_type: &str,
        ) -> Result<String, AppError> {
            Err(AppError::Upload("disk full".to_string()))
        }
    }

    struct RecordingStorage {
        uploaded: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ObjectStorage for RecordingStorage {
        async fn upload(
            &self,
            path: &str,
            _bytes: Vec<u8>,
            _content_type: &str,
        ) -> Result<String, AppError> {
            self.uploaded.lock().unwrap().push(path.to_string());
            Ok(format!("https://storage.example/{}", path))
        }
    }

    fn approved_request() -> PurchaseRequest {
        PurchaseRequest {
            id: Uuid::new_v4(),
            item_name: "Oil filter".to_string(),
            quantity: 2,
            unit_price: Decimal::from(15),
            tax: Decimal::from(3),
            shipping_cost: Decimal::ZERO,
            total_amount: Decimal::from(33),
            status: "APPROVED".to_string(),
            supplier_id: None,
            requested_by: None,
            notes: None,
            verified_by: Some(Uuid::new_v4()),
            verified_at: Some(Utc::now()),
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
            completed_by: None,
            completed_at: None,
            received_date: None,
            completion_notes: None,
            completion_photo_url: None,
            created_at: Utc::now(),
        }
    }

    // La orquestación upload-antes-de-persistir se prueba sobre el modelo y
    // los storages de prueba; el camino con Postgres vive en tests/

    #[tokio::test]
    async fn test_failed_upload_leaves_request_approved() {
        let storage = FailingStorage;
        let mut request = approved_request();

        // Mismo orden que el servicio: primero el upload, después la transición
        let upload = storage.upload("purchase-requests/x/photo.jpg", vec![1, 2], "image/jpeg").await;
        assert!(upload.is_err());

        // Como el upload falló, la transición nunca se aplica
        assert_eq!(request.current_status(), Some(PurchaseRequestStatus::Approved));
        assert!(request.completion_photo_url.is_none());

        // Y la solicitud sigue siendo completable cuando el storage se recupere
        request
            .complete(Uuid::new_v4(), Utc::now(), Utc::now().date_naive(), None, None)
            .unwrap();
        assert_eq!(request.current_status(), Some(PurchaseRequestStatus::Completed));
    }

    #[tokio::test]
    async fn test_successful_upload_url_lands_on_request() {
        let storage = RecordingStorage { uploaded: std::sync::Mutex::new(Vec::new()) };
        let mut request = approved_request();
        let actor = Uuid::new_v4();

        let path = format!("purchase-requests/{}/receipt.jpg", request.id);
        let url = storage.upload(&path, vec![0xFF], "image/jpeg").await.unwrap();
        request
            .complete(actor, Utc::now(), Utc::now().date_naive(), None, Some(url.clone()))
            .unwrap();

        assert_eq!(request.completion_photo_url, Some(url));
        assert_eq!(storage.uploaded.lock().unwrap().len(), 1);
    }
}
