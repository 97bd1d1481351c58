use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::cache_controller::{CacheController, CacheOverview};
use crate::middleware::auth::require_admin;
use crate::models::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_cache_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(cache_stats))
        .route("/refresh", post(refresh_all))
        .route("/refresh/:key", post(refresh_key))
        .route("/invalidate/:key", post(invalidate_key))
}

async fn cache_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<CacheOverview>, AppError> {
    require_admin(&auth)?;
    let controller = CacheController::new(&state);
    Ok(Json(controller.overview()))
}

async fn refresh_all(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_admin(&auth)?;
    let controller = CacheController::new(&state);
    let refreshed = controller.refresh_all().await;
    Ok(Json(serde_json::json!({
        "success": true,
        "refreshed": refreshed
    })))
}

async fn refresh_key(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_admin(&auth)?;
    let controller = CacheController::new(&state);
    let refreshed = controller.refresh_key(&key).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "refreshed": refreshed
    })))
}

async fn invalidate_key(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_admin(&auth)?;
    let controller = CacheController::new(&state);
    controller.invalidate_key(&key).await;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Clave invalidada"
    })))
}
