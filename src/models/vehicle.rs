//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus helpers de estado.
//! `status` y `is_active` son flags independientes que pueden discrepar;
//! las reglas de conteo documentadas los consultan a ambos tal cual.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    /// Estado libre: available | rented | booked | onride | maintenance | ...
    pub status: Option<String>,
    /// Flag de alta, independiente de `status`
    pub is_active: Option<bool>,
    pub daily_rate: Option<Decimal>,
    pub vehicle_type_id: Option<Uuid>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Estado normalizado en minúsculas
    pub fn normalized_status(&self) -> Option<String> {
        self.status.as_deref().map(|s| s.trim().to_lowercase())
    }

    /// Regla documentada de disponibilidad: activo Y (sin estado o "available")
    pub fn counts_as_available(&self) -> bool {
        self.is_active != Some(false)
            && self
                .normalized_status()
                .map_or(true, |s| s == "available")
    }

    pub fn counts_as_maintenance(&self) -> bool {
        self.normalized_status().as_deref() == Some("maintenance")
    }

    pub fn counts_as_on_ride(&self) -> bool {
        matches!(self.normalized_status().as_deref(), Some("onride") | Some("rented"))
    }

    /// Regla documentada del bucket "Booked": cualquier estado distinto de
    /// "available" (incluido ausente). Se solapa con On Ride y Maintenance.
    pub fn counts_as_booked(&self) -> bool {
        self.normalized_status().map_or(true, |s| s != "available")
    }

    pub fn display_label(&self) -> String {
        match (&self.make, &self.model) {
            (Some(make), Some(model)) => format!("{} {}", make, model),
            (Some(make), None) => make.clone(),
            (None, Some(model)) => model.clone(),
            (None, None) => self
                .license_plate
                .clone()
                .unwrap_or_else(|| self.id.to_string()),
        }
    }
}

/// Tipo de vehículo - tabla de referencia para display/filtrado
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleType {
    pub id: Uuid,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(status: Option<&str>, is_active: Option<bool>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            make: Some("Toyota".to_string()),
            model: Some("Hiace".to_string()),
            year: Some(2021),
            license_plate: Some("AB-123-CD".to_string()),
            status: status.map(|s| s.to_string()),
            is_active,
            daily_rate: None,
            vehicle_type_id: None,
            photo_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_available_rule_consults_both_flags() {
        assert!(vehicle(Some("available"), Some(true)).counts_as_available());
        assert!(vehicle(None, None).counts_as_available());
        assert!(!vehicle(Some("available"), Some(false)).counts_as_available());
        assert!(!vehicle(Some("rented"), Some(true)).counts_as_available());
    }

    #[test]
    fn test_booked_overlaps_other_buckets() {
        let m = vehicle(Some("maintenance"), Some(true));
        assert!(m.counts_as_booked());
        assert!(m.counts_as_maintenance());

        let r = vehicle(Some("Rented"), Some(true));
        assert!(r.counts_as_booked());
        assert!(r.counts_as_on_ride());
    }
}
