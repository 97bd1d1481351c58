use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub message: Option<String>,
    pub user_id: Option<Uuid>,
    pub role: Option<String>,
}

impl LoginResponse {
    pub fn success(token: String, user_id: Uuid, role: String) -> Self {
        Self {
            success: true,
            token: Some(token),
            message: None,
            user_id: Some(user_id),
            role: Some(role),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            token: None,
            message: Some(message),
            user_id: None,
            role: None,
        }
    }
}

// Registro de usuarios finales (customer/driver)
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password de al menos 8 caracteres"))]
    pub password: String,
    #[validate(length(min = 1, message = "full_name es requerido"))]
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub address: Option<String>,
    pub id_document_base64: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub license_photo_base64: Option<String>,
}

// Alta de staff (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStaffRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password de al menos 8 caracteres"))]
    pub password: String,
    #[validate(length(min = 1, message = "full_name es requerido"))]
    pub full_name: String,
    pub role: String,
}

// Asignación de rol (solo admin)
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub role: String,
}
