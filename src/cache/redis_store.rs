//! Store de cache sobre Redis
//!
//! Cliente Redis con connection pooling y operaciones async. Los errores de
//! lectura se degradan a miss para no bloquear a los consumidores del cache.

use anyhow::Result;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::{debug, error, info, warn};

use super::store::CacheStore;

/// Configuración del store Redis
#[derive(Debug, Clone)]
pub struct RedisStoreConfig {
    pub redis_url: String,
    pub key_prefix: String,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: "rental_admin".to_string(),
        }
    }
}

/// Cliente Redis con prefijo de claves
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
    config: RedisStoreConfig,
}

impl RedisStore {
    /// Crear nuevo store Redis
    pub async fn new(config: RedisStoreConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager, config })
    }

    /// Generar clave con prefijo
    fn make_key(&self, key: &str) -> String {
        format!("{}:cache:{}", self.config.key_prefix, key)
    }

    /// Verificar si Redis está conectado
    pub async fn is_connected(&self) -> bool {
        let mut conn = self.manager.clone();
        match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
            Ok(response) => response == "PONG",
            Err(_) => false,
        }
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        match conn.get::<_, Option<String>>(&full_key).await {
            Ok(Some(value)) => {
                debug!("📥 Cache HIT para clave: {}", key);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("❌ Cache MISS para clave: {}", key);
                Ok(None)
            }
            Err(e) => {
                warn!("⚠️ Error leyendo cache para clave {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        let result: RedisResult<()> = redis::cmd("SETEX")
            .arg(&full_key)
            .arg(ttl_seconds)
            .arg(value)
            .query_async(&mut conn)
            .await;

        match result {
            Ok(()) => {
                debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando en cache para clave {}: {}", key, e);
                Err(anyhow::anyhow!("Error de Redis: {}", e))
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        let result: RedisResult<i64> = conn.del(&full_key).await;

        match result {
            Ok(count) => {
                debug!("🗑️ Cache DELETE para clave: {} (eliminados: {})", key, count);
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ Error eliminando cache para clave {}: {}", key, e);
                Ok(()) // No fallar si no se puede eliminar
            }
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        match conn.exists(&full_key).await {
            Ok(exists) => Ok(exists),
            Err(e) => {
                warn!("⚠️ Error verificando existencia de clave {}: {}", key, e);
                Ok(false)
            }
        }
    }
}
