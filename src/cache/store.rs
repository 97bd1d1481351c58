//! Sustrato de persistencia del cache
//!
//! El cache de lectura serializa los valores como JSON y los guarda en un
//! `CacheStore`. En producción el store es Redis; en tests, memoria.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Operaciones del sustrato de cache
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Leer el valor serializado de una clave. Un error de lectura del
    /// sustrato se trata como miss, nunca como fallo del caller.
    async fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Guardar un valor serializado con TTL en segundos
    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()>;

    /// Eliminar una clave
    async fn delete(&self, key: &str) -> Result<()>;

    /// Verificar existencia de una clave
    async fn exists(&self, key: &str) -> Result<bool>;
}

/// Store en memoria con TTL, para tests y para correr sin Redis
pub struct MemoryStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()) }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            _ => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value,
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get_raw(key).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.set_raw("k", "v".to_string(), 60).await.unwrap();
        assert_eq!(store.get_raw("k").await.unwrap(), Some("v".to_string()));
        assert!(store.exists("k").await.unwrap());

        store.delete("k").await.unwrap();
        assert_eq!(store.get_raw("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_ttl_expiry() {
        let store = MemoryStore::new();
        store.set_raw("k", "v".to_string(), 0).await.unwrap();
        assert_eq!(store.get_raw("k").await.unwrap(), None);
    }
}
