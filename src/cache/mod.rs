//! Cache
//!
//! Este módulo contiene el cache de lectura unificado y sus sustratos.

pub mod cache_config;
pub mod fetch_error;
pub mod read_through;
pub mod redis_store;
pub mod store;

pub use cache_config::{keys, CacheConfig};
pub use fetch_error::{FetchError, FetchErrorKind};
pub use read_through::{CacheSnapshot, CacheStats, ReadThroughCache};
pub use redis_store::{RedisStore, RedisStoreConfig};
pub use store::{CacheStore, MemoryStore};
