//! Modelo de Customer
//!
//! Enlazado débilmente a users por `user_id`; los campos de contacto se
//! solapan con la tabla users y se resuelven con la cadena de fallback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub id_document_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
