use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

// Request para crear un conductor (alta manual por staff)
#[derive(Debug, Deserialize)]
pub struct CreateDriverRequest {
    pub user_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub license_photo_base64: Option<String>,
}

// Request para cambiar el estado de un conductor
#[derive(Debug, Deserialize)]
pub struct UpdateDriverStatusRequest {
    pub status: String,
}
