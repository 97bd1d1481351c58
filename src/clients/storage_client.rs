//! Cliente de object storage
//!
//! El storage se consume como colaborador opaco: `upload(path, bytes)` es
//! atómico-o-fallido y devuelve una URL pública estable. Las mutaciones que
//! dependen de un asset deben subirlo ANTES de persistir.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Operación de subida de archivos, inyectable para tests
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError>;
}

/// Cliente HTTP contra el servicio de storage
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl StorageClient {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.storage_url.trim_end_matches('/').to_string(),
            bucket: config.storage_bucket.clone(),
            service_key: config.storage_service_key.clone(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, self.bucket, path)
    }
}

#[async_trait]
impl ObjectStorage for StorageClient {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        debug!("📤 Subiendo objeto a storage: {} ({} bytes)", path, bytes.len());

        let response = self
            .client
            .post(self.object_url(path))
            .bearer_auth(&self.service_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Upload(format!("network error subiendo '{}': {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upload(format!(
                "storage respondió {} para '{}': {}",
                status, path, body
            )));
        }

        let url = self.public_url(path);
        info!("✅ Objeto subido: {}", url);
        Ok(url)
    }
}
