use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use rental_admin::cache::{
    CacheConfig, CacheStore, MemoryStore, ReadThroughCache, RedisStore, RedisStoreConfig,
};
use rental_admin::config::environment::EnvironmentConfig;
use rental_admin::database;
use rental_admin::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use rental_admin::routes::build_router;
use rental_admin::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Rental Admin - Consola de administración de alquiler");
    info!("======================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => {
            info!("✅ Base de datos conectada");
            pool
        }
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Inicializar el store del cache: Redis, o memoria si Redis no está
    let redis_config = RedisStoreConfig {
        redis_url: std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        ..RedisStoreConfig::default()
    };
    let store: Arc<dyn CacheStore> = match RedisStore::new(redis_config).await {
        Ok(redis) => {
            info!("✅ Redis conectado exitosamente");
            Arc::new(redis)
        }
        Err(e) => {
            warn!("⚠️ Redis no disponible, cache en memoria: {}", e);
            Arc::new(MemoryStore::new())
        }
    };
    let cache = ReadThroughCache::new(store, CacheConfig::default());

    let cors = if config.is_production() {
        cors_middleware_with_origins(&config.cors_origins)
    } else {
        cors_middleware()
    };

    let app_state = AppState::new(pool, config.clone(), cache);
    let app = build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Login");
    info!("   POST /api/auth/register - Registro customer/driver");
    info!("   GET  /api/users/me - Usuario actual");
    info!("   POST /api/users/staff - Crear usuario staff (admin)");
    info!("   PUT  /api/users/:id/role - Asignar rol (admin)");
    info!("   DELETE /api/users/:id - Eliminar usuario (admin)");
    info!("🚗 Vehicles:");
    info!("   GET  /api/vehicles - Listar (cache)");
    info!("   POST /api/vehicles - Crear");
    info!("   POST /api/vehicles/:id/photo - Subir foto");
    info!("📅 Bookings:");
    info!("   GET  /api/bookings - Listar (cache)");
    info!("   PUT  /api/bookings/:id/status - Cambiar estado");
    info!("   GET  /api/bookings/:id/payments - Pagos de la reserva");
    info!("💰 Payments:");
    info!("   GET  /api/payments - Listar (cache)");
    info!("   POST /api/payments - Registrar pago");
    info!("🛒 Purchase requests:");
    info!("   POST /api/purchase-requests/:id/approve - Aprobar");
    info!("   POST /api/purchase-requests/:id/reject - Rechazar");
    info!("   POST /api/purchase-requests/:id/complete - Completar con evidencia");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard - Reporte agregado (cache)");
    info!("🧰 Cache admin:");
    info!("   GET  /api/cache/stats - Estadísticas");
    info!("   POST /api/cache/refresh - Refrescar todas las claves");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
