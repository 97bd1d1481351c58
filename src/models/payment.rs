//! Modelo de Payment
//!
//! El estado de un pago es pertenencia a conjuntos, no un predicado único:
//! "Paid" y "Completed" significan pagado; "Unpaid" y "Partial" significan
//! no pagado del todo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    /// Paid | Completed | Unpaid | Partial (comparado en minúsculas)
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn is_paid(&self) -> bool {
        matches!(
            self.status.as_deref().map(|s| s.trim().to_lowercase()).as_deref(),
            Some("paid") | Some("completed")
        )
    }

    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}

/// Estado de pago derivado de una reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerivedPaymentStatus {
    Paid,
    Partial,
    Unpaid,
}

impl DerivedPaymentStatus {
    /// Paid si hay pagado y nada pendiente; Partial si hay ambos; si no, Unpaid
    pub fn derive(paid: Decimal, unpaid: Decimal) -> Self {
        if paid > Decimal::ZERO && unpaid == Decimal::ZERO {
            Self::Paid
        } else if paid > Decimal::ZERO && unpaid > Decimal::ZERO {
            Self::Partial
        } else {
            Self::Unpaid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Partial => "Partial",
            Self::Unpaid => "Unpaid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn payment(status: Option<&str>) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            booking_id: None,
            amount: Some(dec(100)),
            status: status.map(|s| s.to_string()),
            payment_method: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_paid_set_membership() {
        assert!(payment(Some("Paid")).is_paid());
        assert!(payment(Some("completed")).is_paid());
        assert!(!payment(Some("Unpaid")).is_paid());
        assert!(!payment(Some("Partial")).is_paid());
        assert!(!payment(None).is_paid());
    }

    #[test]
    fn test_derived_status() {
        assert_eq!(DerivedPaymentStatus::derive(dec(100), dec(0)), DerivedPaymentStatus::Paid);
        assert_eq!(DerivedPaymentStatus::derive(dec(100), dec(50)), DerivedPaymentStatus::Partial);
        assert_eq!(DerivedPaymentStatus::derive(dec(0), dec(50)), DerivedPaymentStatus::Unpaid);
        assert_eq!(DerivedPaymentStatus::derive(dec(0), dec(0)), DerivedPaymentStatus::Unpaid);
    }
}
