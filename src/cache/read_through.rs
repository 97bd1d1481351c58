//! Cache de lectura unificado
//!
//! Reemplaza los flags ad-hoc por pantalla (`isFetching`, `hasFetched`,
//! cooldowns) por un único módulo con garantías reales:
//!
//! - hit: se devuelve el último valor bueno inmediatamente y se programa un
//!   refresco en segundo plano
//! - miss: se hace el fetch inline, deduplicado
//! - a lo sumo UN fetch en vuelo por clave; los callers concurrentes
//!   esperan el mismo future compartido
//! - reintentos con backoff solo para errores de clase red, con timeout por
//!   intento
//! - al agotar los reintentos el valor persistido NO se toca: dato viejo
//!   visible es mejor que dato ausente
//!
//! Los escritores (create/update/delete) deben llamar `set` o `invalidate`
//! tras una mutación exitosa; no hay invalidación automática entre claves.

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::cache_config::CacheConfig;
use super::fetch_error::FetchError;
use super::store::CacheStore;
use crate::utils::errors::AppError;

type FetchOutcome = Result<serde_json::Value, FetchError>;
type SharedFetch = Shared<BoxFuture<'static, FetchOutcome>>;
type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, FetchOutcome> + Send + Sync>;

/// Resultado de una lectura del cache
///
/// `from_cache = true` equivale al render inmediato sin spinner del diseño
/// original; `from_cache = false` indica que hubo fetch inline (el camino
/// "loading"). `error` solo se llena cuando no había dato previo y el fetch
/// inline falló: los fallos de refresco en segundo plano son silenciosos.
#[derive(Debug)]
pub struct CacheSnapshot<T> {
    pub data: Option<T>,
    pub from_cache: bool,
    pub is_refreshing: bool,
    pub error: Option<FetchError>,
}

/// Estadísticas acumuladas del cache
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub refreshes: u64,
    pub retries: u64,
    pub errors: u64,
    pub coalesced: u64,
}

#[derive(Default)]
struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
    retries: AtomicU64,
    errors: AtomicU64,
    coalesced: AtomicU64,
}

/// Cache de lectura con refresco en segundo plano
#[derive(Clone)]
pub struct ReadThroughCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
    /// Registro de fetches en vuelo: garantiza un solo fetch por clave
    in_flight: Mutex<HashMap<String, SharedFetch>>,
    /// Fetchers registrados, para poder refrescar todas las claves montadas
    fetchers: Mutex<HashMap<String, Fetcher>>,
    /// Último intento de fetch por clave, para el throttle de refresco
    last_attempt: Mutex<HashMap<String, Instant>>,
    stats: StatsCounters,
}

impl ReadThroughCache {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                store,
                config,
                in_flight: Mutex::new(HashMap::new()),
                fetchers: Mutex::new(HashMap::new()),
                last_attempt: Mutex::new(HashMap::new()),
                stats: StatsCounters::default(),
            }),
        }
    }

    /// Leer una clave con la semántica cache-then-background-refresh
    ///
    /// Si hay valor persistido se devuelve de inmediato y se programa un
    /// refresco en segundo plano (sujeto al throttle por clave). Si no hay
    /// valor, el fetch se ejecuta inline, deduplicado con cualquier otro
    /// caller concurrente de la misma clave.
    pub async fn get<T, F, Fut>(&self, key: &str, fetcher: F) -> CacheSnapshot<T>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        self.register_fetcher(key, fetcher);

        match self.read_stored(key).await {
            Some(data) => {
                self.inner.stats.hits.fetch_add(1, Ordering::Relaxed);
                let is_refreshing = self.spawn_background_refresh(key);
                CacheSnapshot { data: Some(data), from_cache: true, is_refreshing, error: None }
            }
            None => {
                self.inner.stats.misses.fetch_add(1, Ordering::Relaxed);
                match CacheInner::fetch_and_store(Arc::clone(&self.inner), key).await {
                    Ok(value) => {
                        let data = serde_json::from_value(value).ok();
                        CacheSnapshot { data, from_cache: false, is_refreshing: false, error: None }
                    }
                    Err(e) => CacheSnapshot {
                        data: None,
                        from_cache: false,
                        is_refreshing: false,
                        error: Some(e),
                    },
                }
            }
        }
    }

    /// Refrescar una clave ya registrada
    ///
    /// Con `force = false` respeta la ventana de throttle (análogo al
    /// refresco por cambio de visibilidad del diseño original). Devuelve
    /// `Ok(false)` si el throttle lo saltó.
    pub async fn refresh(&self, key: &str, force: bool) -> Result<bool, FetchError> {
        if !force && !self.inner.throttle_elapsed(key) {
            debug!("⏭️ Refresco de '{}' saltado por throttle", key);
            return Ok(false);
        }
        CacheInner::fetch_and_store(Arc::clone(&self.inner), key).await?;
        Ok(true)
    }

    /// Refrescar en segundo plano todas las claves registradas
    ///
    /// Equivalente al listener único de visibility-change: los disparos
    /// solapados se coalescen sobre el fetch en vuelo y cada clave respeta
    /// su ventana de throttle. Devuelve cuántas claves se refrescaron.
    pub async fn refresh_all(&self) -> usize {
        let keys: Vec<String> = {
            let fetchers = self.inner.fetchers.lock().unwrap();
            fetchers.keys().cloned().collect()
        };

        let mut refreshed = 0;
        for key in keys {
            match self.refresh(&key, false).await {
                Ok(true) => refreshed += 1,
                Ok(false) => {}
                Err(e) => warn!("⚠️ Refresco en segundo plano de '{}' falló: {}", key, e),
            }
        }
        refreshed
    }

    /// Sobrescribir el valor de una clave tras una mutación exitosa
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let serialized = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(format!("Error serializando cache: {}", e)))?;
        self.inner
            .store
            .set_raw(key, serialized, self.inner.config.entry_ttl)
            .await
            .map_err(|e| AppError::Internal(format!("Error persistiendo cache: {}", e)))?;
        self.inner.mark_attempt(key);
        Ok(())
    }

    /// Invalidar una clave tras una mutación exitosa
    pub async fn invalidate(&self, key: &str) {
        if let Err(e) = self.inner.store.delete(key).await {
            warn!("⚠️ Error invalidando clave '{}': {}", key, e);
        }
        self.inner.last_attempt.lock().unwrap().remove(key);
    }

    /// Estadísticas acumuladas
    pub fn stats(&self) -> CacheStats {
        let s = &self.inner.stats;
        CacheStats {
            hits: s.hits.load(Ordering::Relaxed),
            misses: s.misses.load(Ordering::Relaxed),
            refreshes: s.refreshes.load(Ordering::Relaxed),
            retries: s.retries.load(Ordering::Relaxed),
            errors: s.errors.load(Ordering::Relaxed),
            coalesced: s.coalesced.load(Ordering::Relaxed),
        }
    }

    /// Claves actualmente registradas
    pub fn registered_keys(&self) -> Vec<String> {
        let fetchers = self.inner.fetchers.lock().unwrap();
        let mut keys: Vec<String> = fetchers.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn register_fetcher<T, F, Fut>(&self, key: &str, fetcher: F)
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let wrapped: Fetcher = Arc::new(move || {
            let fut = fetcher();
            async move {
                let value = fut.await?;
                serde_json::to_value(value)
                    .map_err(|e| FetchError::internal(format!("Error serializando: {}", e)))
            }
            .boxed()
        });
        self.inner.fetchers.lock().unwrap().insert(key.to_string(), wrapped);
    }

    async fn read_stored<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.inner.store.get_raw(key).await.ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(data) => Some(data),
            Err(e) => {
                // Entrada corrupta o de un shape viejo: se descarta
                warn!("⚠️ Entrada de cache ilegible para '{}', se descarta: {}", key, e);
                let _ = self.inner.store.delete(key).await;
                None
            }
        }
    }

    /// Programar un refresco en segundo plano si el throttle lo permite
    fn spawn_background_refresh(&self, key: &str) -> bool {
        if !self.inner.throttle_elapsed(key) {
            return false;
        }
        let inner = Arc::clone(&self.inner);
        let key = key.to_string();
        tokio::spawn(async move {
            if let Err(e) = CacheInner::fetch_and_store(inner, &key).await {
                // Nunca se propaga: el dato previo sigue siendo visible
                debug!("Refresco en segundo plano de '{}' falló: {}", key, e);
            }
        });
        true
    }
}

impl CacheInner {
    /// Ejecutar el fetch de una clave, deduplicado contra el registro en vuelo
    async fn fetch_and_store(inner: Arc<CacheInner>, key: &str) -> FetchOutcome {
        let fetcher = { inner.fetchers.lock().unwrap().get(key).cloned() };
        let Some(fetcher) = fetcher else {
            return Err(FetchError::internal(format!("No hay fetcher registrado para '{}'", key)));
        };

        let shared = {
            let mut in_flight = inner.in_flight.lock().unwrap();
            if let Some(existing) = in_flight.get(key) {
                inner.stats.coalesced.fetch_add(1, Ordering::Relaxed);
                debug!("🤝 Fetch de '{}' coalescido sobre el que está en vuelo", key);
                existing.clone()
            } else {
                let task_inner = Arc::clone(&inner);
                let task_key = key.to_string();
                let fut = async move {
                    let outcome =
                        CacheInner::run_with_retries(&task_inner, &task_key, fetcher).await;
                    task_inner.in_flight.lock().unwrap().remove(&task_key);
                    outcome
                }
                .boxed()
                .shared();
                in_flight.insert(key.to_string(), fut.clone());
                fut
            }
        };

        shared.await
    }

    /// Fetch con timeout por intento y reintentos con backoff
    ///
    /// Solo errores de clase red se reintentan. Un fallo definitivo deja el
    /// valor persistido exactamente como estaba.
    async fn run_with_retries(inner: &Arc<CacheInner>, key: &str, fetcher: Fetcher) -> FetchOutcome {
        inner.mark_attempt(key);

        let max_attempts = inner.config.max_retries.max(1);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let result = match tokio::time::timeout(inner.config.fetch_timeout(), (fetcher)()).await
            {
                Ok(result) => result,
                Err(_) => Err(FetchError::timeout(key)),
            };

            match result {
                Ok(value) => {
                    match serde_json::to_string(&value) {
                        Ok(serialized) => {
                            if let Err(e) =
                                inner.store.set_raw(key, serialized, inner.config.entry_ttl).await
                            {
                                warn!("⚠️ No se pudo persistir '{}' en el cache: {}", key, e);
                            }
                        }
                        Err(e) => warn!("⚠️ Error serializando '{}': {}", key, e),
                    }
                    inner.stats.refreshes.fetch_add(1, Ordering::Relaxed);
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    inner.stats.retries.fetch_add(1, Ordering::Relaxed);
                    let delay = inner.backoff_delay(attempt);
                    debug!(
                        "🔁 Fetch de '{}' falló (intento {}/{}), reintento en {:?}: {}",
                        key, attempt, max_attempts, delay, e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    inner.stats.errors.fetch_add(1, Ordering::Relaxed);
                    warn!("❌ Fetch de '{}' agotado tras {} intento(s): {}", key, attempt, e);
                    return Err(e);
                }
            }
        }
    }

    /// Delay de backoff: min(base * intento², tope) más un jitter pequeño
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self.config.retry_base_ms.saturating_mul(u64::from(attempt * attempt));
        let capped = base.min(self.config.retry_cap_ms);
        let jitter = rand::thread_rng().gen_range(0..50);
        Duration::from_millis(capped + jitter)
    }

    fn throttle_elapsed(&self, key: &str) -> bool {
        let last_attempt = self.last_attempt.lock().unwrap();
        last_attempt
            .get(key)
            .map_or(true, |at| at.elapsed() >= self.config.refresh_throttle())
    }

    fn mark_attempt(&self, key: &str) {
        self.last_attempt.lock().unwrap().insert(key.to_string(), Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::MemoryStore;
    use std::sync::atomic::AtomicUsize;

    fn test_cache(config: CacheConfig) -> ReadThroughCache {
        ReadThroughCache::new(Arc::new(MemoryStore::new()), config)
    }

    fn fast_config() -> CacheConfig {
        CacheConfig {
            entry_ttl: 60,
            max_retries: 3,
            retry_base_ms: 1,
            retry_cap_ms: 5,
            fetch_timeout_ms: 1000,
            refresh_throttle_secs: 30,
        }
    }

    #[tokio::test]
    async fn test_concurrent_gets_fetch_at_most_once() {
        let cache = test_cache(fast_config());
        let calls = Arc::new(AtomicUsize::new(0));

        let c1 = Arc::clone(&calls);
        let c2 = Arc::clone(&calls);
        let make = |calls: Arc<AtomicUsize>| {
            move || {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok::<Vec<u32>, FetchError>(vec![1, 2, 3])
                }
            }
        };

        let (a, b) = tokio::join!(
            cache.get::<Vec<u32>, _, _>("shared", make(c1)),
            cache.get::<Vec<u32>, _, _>("shared", make(c2)),
        );

        assert_eq!(a.data, Some(vec![1, 2, 3]));
        assert_eq!(b.data, Some(vec![1, 2, 3]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_are_invisible_to_caller() {
        let cache = test_cache(fast_config());
        let calls = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&calls);
        let snapshot = cache
            .get::<String, _, _>("flaky", move || {
                let calls = Arc::clone(&c);
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err(FetchError::network("connection reset"))
                    } else {
                        Ok("ok".to_string())
                    }
                }
            })
            .await;

        assert_eq!(snapshot.data, Some("ok".to_string()));
        assert!(snapshot.error.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permission_errors_fail_without_retry() {
        let cache = test_cache(fast_config());
        let calls = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&calls);
        let snapshot = cache
            .get::<String, _, _>("denied", move || {
                let calls = Arc::clone(&c);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<String, _>(FetchError::permission("permission denied"))
                }
            })
            .await;

        assert!(snapshot.data.is_none());
        assert!(snapshot.error.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhausted_retries_leave_stored_data_untouched() {
        let cache = test_cache(fast_config());
        cache.set("stable", &vec![10, 20]).await.unwrap();

        // Registrar un fetcher que siempre falla y forzar el refresco
        let snapshot = cache
            .get::<Vec<u32>, _, _>("stable", || async {
                Err::<Vec<u32>, _>(FetchError::network("fetch failed"))
            })
            .await;
        assert_eq!(snapshot.data, Some(vec![10, 20]));

        let refreshed = cache.refresh("stable", true).await;
        assert!(refreshed.is_err());

        // El dato previo sigue intacto
        let again = cache
            .get::<Vec<u32>, _, _>("stable", || async {
                Err::<Vec<u32>, _>(FetchError::network("fetch failed"))
            })
            .await;
        assert_eq!(again.data, Some(vec![10, 20]));
    }

    #[tokio::test]
    async fn test_timeout_is_retried_as_network_error() {
        let mut config = fast_config();
        config.fetch_timeout_ms = 20;
        config.max_retries = 2;
        let cache = test_cache(config);
        let calls = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&calls);
        let snapshot = cache
            .get::<String, _, _>("hang", move || {
                let calls = Arc::clone(&c);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    Ok("never".to_string())
                }
            })
            .await;

        assert!(snapshot.data.is_none());
        let error = snapshot.error.unwrap();
        assert!(error.is_retryable());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_throttle_skips_recent_keys() {
        let cache = test_cache(fast_config());

        let snapshot = cache
            .get::<u32, _, _>("throttled", || async { Ok::<u32, FetchError>(7) })
            .await;
        assert_eq!(snapshot.data, Some(7));

        // El fetch inline acaba de correr: el refresco no forzado se salta
        let refreshed = cache.refresh("throttled", false).await.unwrap();
        assert!(!refreshed);

        // Forzado sí corre
        let forced = cache.refresh("throttled", true).await.unwrap();
        assert!(forced);
    }

    #[tokio::test]
    async fn test_invalidate_clears_entry() {
        let cache = test_cache(fast_config());
        cache.set("gone", &"value".to_string()).await.unwrap();
        cache.invalidate("gone").await;

        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let snapshot = cache
            .get::<String, _, _>("gone", move || {
                let calls = Arc::clone(&c);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("fresh".to_string())
                }
            })
            .await;

        assert_eq!(snapshot.data, Some("fresh".to_string()));
        assert!(!snapshot.from_cache);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_all_coalesces_registered_keys() {
        let mut config = fast_config();
        config.refresh_throttle_secs = 0;
        let cache = test_cache(config);

        cache.get::<u32, _, _>("a", || async { Ok::<u32, FetchError>(1) }).await;
        cache.get::<u32, _, _>("b", || async { Ok::<u32, FetchError>(2) }).await;

        let refreshed = cache.refresh_all().await;
        assert_eq!(refreshed, 2);
        assert_eq!(cache.registered_keys(), vec!["a".to_string(), "b".to_string()]);
    }
}
