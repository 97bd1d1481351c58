//! Routes de la API
//!
//! Handlers finos de Axum por recurso; la lógica vive en controllers/.

pub mod auth_routes;
pub mod booking_routes;
pub mod cache_routes;
pub mod customer_routes;
pub mod dashboard_routes;
pub mod driver_routes;
pub mod payment_routes;
pub mod purchase_request_routes;
pub mod vehicle_routes;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

/// Router completo de la API: /health y /api/auth públicos, el resto
/// detrás del middleware JWT
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/bookings", booking_routes::create_booking_router())
        .nest("/api/customers", customer_routes::create_customer_router())
        .nest("/api/drivers", driver_routes::create_driver_router())
        .nest("/api/payments", payment_routes::create_payment_router())
        .nest(
            "/api/purchase-requests",
            purchase_request_routes::create_purchase_request_router(),
        )
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .nest("/api/cache", cache_routes::create_cache_router())
        .nest("/api/users", auth_routes::create_user_admin_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", auth_routes::create_auth_router())
        .merge(protected)
        .with_state(state)
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "rental_admin",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
