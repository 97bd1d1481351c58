use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::common_dto::{ApiResponse, CachedResponse};
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverStatusRequest};
use crate::models::Driver;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_driver))
        .route("/", get(list_drivers))
        .route("/:id", get(get_driver))
        .route("/:id/status", put(update_driver_status))
        .route("/:id", delete(delete_driver))
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_drivers(
    State(state): State<AppState>,
) -> Result<Json<CachedResponse<Vec<Driver>>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_driver_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverStatusRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DriverController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Conductor eliminado exitosamente"
    })))
}
