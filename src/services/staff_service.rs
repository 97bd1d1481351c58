//! Servicio de administración de staff
//!
//! Las operaciones privilegiadas (crear usuario staff, asignar rol, borrar
//! usuario) se delegan a funciones serverless con credencial de servicio,
//! así la sesión del admin que las dispara nunca se toca.

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::cache::{keys, ReadThroughCache};
use crate::clients::FunctionsClient;
use crate::models::User;
use crate::repositories::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::{is_staff_role, is_valid_email};

pub struct StaffService {
    users: UserRepository,
    functions: FunctionsClient,
    cache: ReadThroughCache,
}

impl StaffService {
    pub fn new(users: UserRepository, functions: FunctionsClient, cache: ReadThroughCache) -> Self {
        Self { users, functions, cache }
    }

    /// Crear un usuario staff vía función serverless
    ///
    /// `preserve_session: true` le indica a la función que use la credencial
    /// de servicio en vez de iniciar sesión como el usuario nuevo.
    pub async fn create_staff_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: &str,
    ) -> Result<Uuid, AppError> {
        if !is_valid_email(email) {
            return Err(AppError::BadRequest("Email inválido".to_string()));
        }
        if !is_staff_role(role) {
            return Err(AppError::BadRequest(format!("'{}' no es un rol de staff", role)));
        }
        if self.users.email_exists(email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        let response = self
            .functions
            .invoke(
                "create-staff-user",
                json!({
                    "email": email,
                    "password": password,
                    "full_name": full_name,
                    "role": role,
                    "preserve_session": true,
                }),
            )
            .await?;

        let user_id = response
            .get("user_id")
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| {
                AppError::ExternalApi("create-staff-user no devolvió user_id".to_string())
            })?;

        info!("✅ Usuario staff creado: {} ({})", user_id, role);
        Ok(user_id)
    }

    /// Asignar un rol a un usuario existente
    pub async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<User, AppError> {
        if !is_staff_role(role) && role != "customer" && role != "driver" {
            return Err(AppError::BadRequest(format!("Rol desconocido: '{}'", role)));
        }

        self.functions
            .invoke("assign-role", json!({ "user_id": user_id, "role": role }))
            .await?;

        // La tabla local se actualiza recién después de que la función confirmó
        let user = self.users.update_role(user_id, role).await?;
        info!("✅ Rol '{}' asignado a {}", role, user_id);
        Ok(user)
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError> {
        self.functions
            .invoke("delete-user", json!({ "user_id": user_id }))
            .await?;
        self.users.delete(user_id).await?;

        info!("🗑️ Usuario eliminado: {}", user_id);
        self.cache.invalidate(keys::customers()).await;
        self.cache.invalidate(keys::drivers()).await;
        Ok(())
    }
}
