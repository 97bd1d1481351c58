//! Modelo de User
//!
//! Tabla base de usuarios; customers y drivers la referencian por `user_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    /// Rol como string plano: admin | staff | customer | driver
    pub role: Option<String>,
    /// Metadata JSON libre (puede traer full_name/phone de registro)
    pub metadata: Option<serde_json::Value>,
    // Nunca viaja en respuestas ni al cache
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_staff(&self) -> bool {
        matches!(self.role.as_deref(), Some("admin") | Some("staff"))
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}
