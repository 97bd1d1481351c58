use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::{ApiResponse, CachedResponse};
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, UploadVehiclePhotoRequest, VehicleListQuery,
};
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/types", get(list_vehicle_types))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/photo", post(upload_vehicle_photo))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> Result<Json<CachedResponse<Vec<Vehicle>>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn list_vehicle_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<crate::models::VehicleType>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list_types().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn upload_vehicle_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UploadVehiclePhotoRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller
        .upload_photo(id, &request.photo_base64, request.content_type.as_deref())
        .await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}
