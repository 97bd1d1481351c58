//! Modelo de Booking
//!
//! Las reservas referencian un vehículo y un usuario; los pagos se enlazan
//! por `booking_id`, nunca embebidos.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    /// Estado libre comparado en minúsculas:
    /// pending | booked | confirmed | onride | completed | cancelled
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub staff_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn normalized_status(&self) -> Option<String> {
        self.status.as_deref().map(|s| s.trim().to_lowercase())
    }

    /// Una reserva está activa si no terminó ni se canceló
    pub fn is_active(&self) -> bool {
        !matches!(
            self.normalized_status().as_deref(),
            Some("completed") | Some("cancelled")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: Option<&str>) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            vehicle_id: None,
            user_id: None,
            status: status.map(|s| s.to_string()),
            start_date: None,
            end_date: None,
            staff_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_is_case_insensitive() {
        assert_eq!(booking(Some("  Confirmed ")).normalized_status().as_deref(), Some("confirmed"));
        assert!(booking(Some("OnRide")).is_active());
        assert!(!booking(Some("Cancelled")).is_active());
        assert!(!booking(Some("COMPLETED")).is_active());
        assert!(booking(None).is_active());
    }
}
