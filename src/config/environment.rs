//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    // Colaborador de object storage (fotos de vehículos, documentos, evidencias)
    pub storage_url: String,
    pub storage_bucket: String,
    pub storage_service_key: String,
    // Colaborador de funciones serverless (operaciones privilegiadas)
    pub functions_url: String,
    pub functions_service_key: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
                .collect(),
            storage_url: env::var("STORAGE_URL").expect("STORAGE_URL must be set"),
            storage_bucket: env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "rental-documents".to_string()),
            storage_service_key: env::var("STORAGE_SERVICE_KEY")
                .expect("STORAGE_SERVICE_KEY must be set"),
            functions_url: env::var("FUNCTIONS_URL").expect("FUNCTIONS_URL must be set"),
            functions_service_key: env::var("FUNCTIONS_SERVICE_KEY")
                .expect("FUNCTIONS_SERVICE_KEY must be set"),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
