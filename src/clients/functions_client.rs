//! Cliente de funciones serverless
//!
//! Operaciones privilegiadas (crear usuario staff, asignar rol, borrar
//! usuario) que este backend no ejecuta directamente: se invocan por nombre
//! con request/response JSON.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct FunctionsClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl FunctionsClient {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.functions_url.trim_end_matches('/').to_string(),
            service_key: config.functions_service_key.clone(),
        }
    }

    /// Invocar una función por nombre con payload JSON
    pub async fn invoke(&self, name: &str, payload: Value) -> Result<Value, AppError> {
        let url = format!("{}/functions/v1/{}", self.base_url, name);
        debug!("⚡ Invocando función '{}'", name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("network error invocando '{}': {}", name, e)))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("respuesta ilegible de '{}': {}", name, e)))?;

        if !status.is_success() {
            warn!("❌ Función '{}' respondió {}: {}", name, status, body);
            return Err(AppError::ExternalApi(format!(
                "función '{}' respondió {}: {}",
                name, status, body
            )));
        }

        Ok(body)
    }
}
