//! Servicio de registro de usuarios
//!
//! El rol decide qué perfil se crea además del usuario base: `customer`
//! crea una fila en customers, `driver` una en drivers. Los documentos
//! adjuntos (DNI, foto de licencia) llegan en base64 y se suben al storage
//! ANTES del insert del perfil, para no persistir perfiles con evidencia
//! perdida.

use base64::Engine;
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::cache::{keys, ReadThroughCache};
use crate::clients::ObjectStorage;
use crate::models::User;
use crate::repositories::{CustomerRepository, DriverRepository, UserRepository};
use crate::utils::errors::AppError;
use crate::utils::validation::{is_self_register_role, is_valid_email, is_valid_phone};

/// Datos de registro, ya deserializados del DTO
pub struct RegistrationInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub address: Option<String>,
    /// DNI/pasaporte en base64 (solo customer)
    pub id_document_base64: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    /// Foto de la licencia en base64 (solo driver)
    pub license_photo_base64: Option<String>,
}

pub struct RegistrationService {
    users: UserRepository,
    customers: CustomerRepository,
    drivers: DriverRepository,
    storage: Arc<dyn ObjectStorage>,
    cache: ReadThroughCache,
}

impl RegistrationService {
    pub fn new(
        users: UserRepository,
        customers: CustomerRepository,
        drivers: DriverRepository,
        storage: Arc<dyn ObjectStorage>,
        cache: ReadThroughCache,
    ) -> Self {
        Self { users, customers, drivers, storage, cache }
    }

    pub async fn register(&self, input: RegistrationInput) -> Result<User, AppError> {
        validate_registration(&input)?;

        if self.users.email_exists(&input.email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))?;

        let metadata = json!({
            "full_name": input.full_name,
            "phone": input.phone,
            "role": input.role,
        });

        let user = self
            .users
            .create(
                &input.email,
                &password_hash,
                Some(input.full_name.clone()),
                input.phone.clone(),
                &input.role,
                Some(metadata),
            )
            .await?;

        match input.role.as_str() {
            "customer" => self.create_customer_profile(&user, &input).await?,
            "driver" => self.create_driver_profile(&user, &input).await?,
            _ => {}
        }

        info!("✅ Usuario registrado: {} (rol {})", user.id, input.role);
        Ok(user)
    }

    async fn create_customer_profile(
        &self,
        user: &User,
        input: &RegistrationInput,
    ) -> Result<(), AppError> {
        // Upload antes del insert: un documento perdido no deja perfil a medias
        let id_document_url = match &input.id_document_base64 {
            Some(encoded) => {
                let bytes = decode_document(encoded)?;
                let path = format!("customers/{}/id-document.jpg", user.id);
                Some(self.storage.upload(&path, bytes, "image/jpeg").await?)
            }
            None => None,
        };

        self.customers
            .create(
                Some(user.id),
                Some(input.full_name.clone()),
                Some(input.email.clone()),
                input.phone.clone(),
                input.address.clone(),
                id_document_url,
            )
            .await?;

        self.cache.invalidate(keys::customers()).await;
        Ok(())
    }

    async fn create_driver_profile(
        &self,
        user: &User,
        input: &RegistrationInput,
    ) -> Result<(), AppError> {
        let license_photo_url = match &input.license_photo_base64 {
            Some(encoded) => {
                let bytes = decode_document(encoded)?;
                let path = format!("drivers/{}/license.jpg", user.id);
                Some(self.storage.upload(&path, bytes, "image/jpeg").await?)
            }
            None => None,
        };

        self.drivers
            .create(
                Some(user.id),
                Some(input.full_name.clone()),
                Some(input.email.clone()),
                input.phone.clone(),
                input.license_number.clone(),
                input.license_expiry,
                license_photo_url,
            )
            .await?;

        self.cache.invalidate(keys::drivers()).await;
        Ok(())
    }
}

fn validate_registration(input: &RegistrationInput) -> Result<(), AppError> {
    if !is_valid_email(&input.email) {
        return Err(AppError::BadRequest("Email inválido".to_string()));
    }
    if input.password.len() < 8 {
        return Err(AppError::BadRequest(
            "El password debe tener al menos 8 caracteres".to_string(),
        ));
    }
    if input.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("El nombre es requerido".to_string()));
    }
    if let Some(phone) = &input.phone {
        if !is_valid_phone(phone) {
            return Err(AppError::BadRequest("Teléfono inválido".to_string()));
        }
    }
    if !is_self_register_role(&input.role) {
        return Err(AppError::BadRequest(format!(
            "Rol '{}' no permitido para auto-registro",
            input.role
        )));
    }
    if input.role == "driver" && input.license_number.is_none() {
        return Err(AppError::BadRequest(
            "Un driver necesita número de licencia".to_string(),
        ));
    }
    Ok(())
}

/// Decodificar un documento adjunto, con o sin prefijo data-URL
pub fn decode_document(encoded: &str) -> Result<Vec<u8>, AppError> {
    let payload = match encoded.split_once(";base64,") {
        Some((_, rest)) => rest,
        None => encoded,
    };
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::BadRequest(format!("Documento base64 inválido: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(role: &str) -> RegistrationInput {
        RegistrationInput {
            email: "new.user@example.com".to_string(),
            password: "s3cret-pass".to_string(),
            full_name: "New User".to_string(),
            phone: Some("+34 600 111 222".to_string()),
            role: role.to_string(),
            address: None,
            id_document_base64: None,
            license_number: Some("L-123".to_string()),
            license_expiry: None,
            license_photo_base64: None,
        }
    }

    #[test]
    fn test_validation_accepts_customer_and_driver() {
        assert!(validate_registration(&input("customer")).is_ok());
        assert!(validate_registration(&input("driver")).is_ok());
    }

    #[test]
    fn test_validation_rejects_staff_roles() {
        let result = validate_registration(&input("admin"));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validation_rejects_driver_without_license() {
        let mut i = input("driver");
        i.license_number = None;
        assert!(validate_registration(&i).is_err());
    }

    #[test]
    fn test_validation_rejects_short_password() {
        let mut i = input("customer");
        i.password = "short".to_string();
        assert!(validate_registration(&i).is_err());
    }

    #[test]
    fn test_decode_document_strips_data_url_prefix() {
        let raw = base64::engine::general_purpose::STANDARD.encode(b"photo-bytes");
        let with_prefix = format!("data:image/jpeg;base64,{}", raw);

        assert_eq!(decode_document(&raw).unwrap(), b"photo-bytes");
        assert_eq!(decode_document(&with_prefix).unwrap(), b"photo-bytes");
        assert!(decode_document("!!not-base64!!").is_err());
    }
}
