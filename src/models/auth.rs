//! Tipos de autenticación
//!
//! Usuario autenticado que el middleware inyecta como extension del request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn is_staff(&self) -> bool {
        self.role == "admin" || self.role == "staff"
    }
}
