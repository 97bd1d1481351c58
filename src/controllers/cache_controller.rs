use serde::Serialize;

use crate::cache::{CacheStats, ReadThroughCache};
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Serialize)]
pub struct CacheOverview {
    pub stats: CacheStats,
    pub registered_keys: Vec<String>,
}

pub struct CacheController {
    cache: ReadThroughCache,
}

impl CacheController {
    pub fn new(state: &AppState) -> Self {
        Self { cache: state.cache.clone() }
    }

    pub fn overview(&self) -> CacheOverview {
        CacheOverview {
            stats: self.cache.stats(),
            registered_keys: self.cache.registered_keys(),
        }
    }

    /// Refrescar todas las claves registradas (throttle por clave aplica)
    pub async fn refresh_all(&self) -> usize {
        self.cache.refresh_all().await
    }

    /// Refrescar una clave puntual, saltando el throttle
    pub async fn refresh_key(&self, key: &str) -> Result<bool, AppError> {
        self.cache
            .refresh(key, true)
            .await
            .map_err(|e| AppError::Internal(format!("Refresco de '{}' falló: {}", key, e)))
    }

    pub async fn invalidate_key(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}
