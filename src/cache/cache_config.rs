//! Configuración de cache
//!
//! Este módulo contiene la configuración para el sistema de cache.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuración del cache de lectura
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL de las entradas persistidas, en segundos
    pub entry_ttl: u64,
    /// Número máximo de intentos por fetch (incluye el primero)
    pub max_retries: u32,
    /// Base en milisegundos del backoff: min(base * intento², retry_cap_ms)
    pub retry_base_ms: u64,
    /// Tope del backoff en milisegundos
    pub retry_cap_ms: u64,
    /// Timeout por intento de fetch
    pub fetch_timeout_ms: u64,
    /// Ventana mínima entre refrescos en segundo plano de una misma clave
    pub refresh_throttle_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entry_ttl: 3600, // 1 hora
            max_retries: 3,
            retry_base_ms: 1000,
            retry_cap_ms: 5000,
            fetch_timeout_ms: 10_000,
            refresh_throttle_secs: 30,
        }
    }
}

impl CacheConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn refresh_throttle(&self) -> Duration {
        Duration::from_secs(self.refresh_throttle_secs)
    }
}

/// Claves de cache centralizadas
///
/// Todas las pantallas consumen estas funciones en lugar de armar
/// strings a mano, para que mutación e invalidación usen la misma clave.
pub mod keys {
    pub fn vehicles() -> &'static str {
        "vehicles"
    }

    pub fn bookings() -> &'static str {
        "bookings"
    }

    pub fn customers() -> &'static str {
        "customers"
    }

    pub fn drivers() -> &'static str {
        "drivers"
    }

    pub fn payments() -> &'static str {
        "payments"
    }

    pub fn purchase_requests() -> &'static str {
        "purchase_requests"
    }

    pub fn dashboard() -> &'static str {
        "dashboard:report"
    }
}
