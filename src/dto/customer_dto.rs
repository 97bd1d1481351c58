use serde::Deserialize;
use uuid::Uuid;

// Request para crear un cliente (alta manual por staff)
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub user_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub id_document_base64: Option<String>,
}

// Request para actualizar un cliente
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// Búsqueda por texto libre
#[derive(Debug, Deserialize)]
pub struct CustomerSearchQuery {
    pub q: Option<String>,
}
