//! Modelo de PurchaseRequest y su máquina de estados
//!
//! PENDING → APPROVED → COMPLETED, y PENDING → REJECTED (terminal).
//! Cada transición estampa actor y timestamp. Una transición ilegal falla
//! con `InvalidState` sin mutar ningún campo.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{invalid_state_error, AppError};

/// Estados del ciclo de vida de una solicitud de compra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PurchaseRequestStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl PurchaseRequestStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Completed => "COMPLETED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PurchaseRequest {
    pub id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    /// Calculado a la creación; inmutable después
    pub total_amount: Decimal,
    pub status: String,
    pub supplier_id: Option<Uuid>,
    pub requested_by: Option<Uuid>,
    pub notes: Option<String>,
    pub verified_by: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub completed_by: Option<Uuid>,
    pub completed_at: Option<DateTime<Utc>>,
    pub received_date: Option<NaiveDate>,
    pub completion_notes: Option<String>,
    pub completion_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PurchaseRequest {
    /// total = cantidad * precio unitario + impuesto + envío
    pub fn compute_total(
        quantity: i32,
        unit_price: Decimal,
        tax: Decimal,
        shipping_cost: Decimal,
    ) -> Decimal {
        Decimal::from(quantity) * unit_price + tax + shipping_cost
    }

    pub fn current_status(&self) -> Option<PurchaseRequestStatus> {
        PurchaseRequestStatus::parse(&self.status)
    }

    fn ensure_status(
        &self,
        expected: PurchaseRequestStatus,
        operation: &str,
    ) -> Result<(), AppError> {
        if self.current_status() != Some(expected) {
            return Err(invalid_state_error(operation, &self.status, expected.as_str()));
        }
        Ok(())
    }

    /// PENDING → APPROVED; estampa verified_by/at
    pub fn approve(&mut self, actor: Uuid, now: DateTime<Utc>) -> Result<(), AppError> {
        self.ensure_status(PurchaseRequestStatus::Pending, "approve")?;
        self.status = PurchaseRequestStatus::Approved.as_str().to_string();
        self.verified_by = Some(actor);
        self.verified_at = Some(now);
        Ok(())
    }

    /// PENDING → REJECTED (terminal); estampa rejected_by/at y motivo
    pub fn reject(
        &mut self,
        actor: Uuid,
        now: DateTime<Utc>,
        reason: Option<String>,
    ) -> Result<(), AppError> {
        self.ensure_status(PurchaseRequestStatus::Pending, "reject")?;
        self.status = PurchaseRequestStatus::Rejected.as_str().to_string();
        self.rejected_by = Some(actor);
        self.rejected_at = Some(now);
        self.rejection_reason = reason;
        Ok(())
    }

    /// APPROVED → COMPLETED (terminal); requiere fecha de recepción.
    /// La URL de la foto debe venir ya subida: el servicio sube la evidencia
    /// ANTES de llamar acá, para que un upload fallido nunca deje la
    /// solicitud marcada como completada.
    pub fn complete(
        &mut self,
        actor: Uuid,
        now: DateTime<Utc>,
        received_date: NaiveDate,
        notes: Option<String>,
        photo_url: Option<String>,
    ) -> Result<(), AppError> {
        self.ensure_status(PurchaseRequestStatus::Approved, "complete")?;
        self.status = PurchaseRequestStatus::Completed.as_str().to_string();
        self.completed_by = Some(actor);
        self.completed_at = Some(now);
        self.received_date = Some(received_date);
        self.completion_notes = notes;
        self.completion_photo_url = photo_url;
        Ok(())
    }

    /// Verificación barata previa a trabajo costoso (p.ej. subir una foto)
    pub fn can_complete(&self) -> bool {
        self.current_status() == Some(PurchaseRequestStatus::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: &str) -> PurchaseRequest {
        PurchaseRequest {
            id: Uuid::new_v4(),
            item_name: "Brake pads".to_string(),
            quantity: 4,
            unit_price: Decimal::from(25),
            tax: Decimal::from(10),
            shipping_cost: Decimal::from(5),
            total_amount: Decimal::from(115),
            status: status.to_string(),
            supplier_id: None,
            requested_by: None,
            notes: None,
            verified_by: None,
            verified_at: None,
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

    #[test]
    fn test_compute_total() {
        let total = PurchaseRequest::compute_total(
            4,
            Decimal::from(25),
            Decimal::from(10),
            Decimal::from(5),
        );
        assert_eq!(total, Decimal::from(115));
    }

    #[test]
    fn test_approve_from_pending() {
        let mut req = request("PENDING");
        let actor = Uuid::new_v4();
        req.approve(actor, Utc::now()).unwrap();

        assert_eq!(req.current_status(), Some(PurchaseRequestStatus::Approved));
        assert_eq!(req.verified_by, Some(actor));
        assert!(req.verified_at.is_some());
    }

    #[test]
    fn test_approve_from_wrong_state_mutates_nothing() {
        let mut req = request("APPROVED");
        let before = req.clone();

        let result = req.approve(Uuid::new_v4(), Utc::now());
        assert!(matches!(result, Err(AppError::InvalidState(_))));

        assert_eq!(req.status, before.status);
        assert_eq!(req.verified_by, before.verified_by);
        assert_eq!(req.verified_at, before.verified_at);
    }

    #[test]
    fn test_reject_is_terminal() {
        let mut req = request("PENDING");
        req.reject(Uuid::new_v4(), Utc::now(), Some("too expensive".to_string()))
            .unwrap();
        assert_eq!(req.current_status(), Some(PurchaseRequestStatus::Rejected));

        // No hay salida de REJECTED
        assert!(req.approve(Uuid::new_v4(), Utc::now()).is_err());
        assert!(req
            .complete(Uuid::new_v4(), Utc::now(), Utc::now().date_naive(), None, None)
            .is_err());
    }

    #[test]
    fn test_complete_requires_approved() {
        let mut req = request("PENDING");
        assert!(req
            .complete(Uuid::new_v4(), Utc::now(), Utc::now().date_naive(), None, None)
            .is_err());
        assert!(req.completed_at.is_none());

        req.approve(Uuid::new_v4(), Utc::now()).unwrap();
        let actor = Uuid::new_v4();
        let received = Utc::now().date_naive();
        req.complete(actor, Utc::now(), received, Some("ok".to_string()), None)
            .unwrap();

        assert_eq!(req.current_status(), Some(PurchaseRequestStatus::Completed));
        assert_eq!(req.completed_by, Some(actor));
        assert_eq!(req.received_date, Some(received));
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(PurchaseRequestStatus::parse("pending"), Some(PurchaseRequestStatus::Pending));
        assert_eq!(PurchaseRequestStatus::parse(" COMPLETED "), Some(PurchaseRequestStatus::Completed));
        assert_eq!(PurchaseRequestStatus::parse("unknown"), None);
    }
}
