//! Shared application state
//!
//! Estado compartido de la aplicación que se pasa a través del router de
//! Axum: pool de Postgres, cache de lectura y clientes externos.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::ReadThroughCache;
use crate::clients::{FunctionsClient, ObjectStorage, StorageClient};
use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub cache: ReadThroughCache,
    pub storage: Arc<dyn ObjectStorage>,
    pub functions: FunctionsClient,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, cache: ReadThroughCache) -> Self {
        let storage = Arc::new(StorageClient::new(&config));
        let functions = FunctionsClient::new(&config);
        Self { pool, config, cache, storage, functions }
    }
}
