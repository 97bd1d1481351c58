use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

// Request para crear un vehículo
#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
    pub daily_rate: Option<Decimal>,
    pub vehicle_type_id: Option<Uuid>,
}

// Request para actualizar un vehículo (campos parciales)
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
    pub daily_rate: Option<Decimal>,
}

// Query de listado con filtros en SQL
#[derive(Debug, Deserialize)]
pub struct VehicleListQuery {
    pub status: Option<String>,
    pub q: Option<String>,
}

// Foto del vehículo en base64
#[derive(Debug, Deserialize)]
pub struct UploadVehiclePhotoRequest {
    pub photo_base64: String,
    pub content_type: Option<String>,
}
