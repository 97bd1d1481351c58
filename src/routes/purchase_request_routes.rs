use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::purchase_request_controller::PurchaseRequestController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::purchase_request_dto::{
    CompletePurchaseRequestRequest, CreatePurchaseRequestRequest, PurchaseRequestListQuery,
    RejectPurchaseRequestRequest,
};
use crate::middleware::auth::require_staff;
use crate::models::{AuthUser, PurchaseRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_purchase_request_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_purchase_request))
        .route("/", get(list_purchase_requests))
        .route("/:id/approve", post(approve_purchase_request))
        .route("/:id/reject", post(reject_purchase_request))
        .route("/:id/complete", post(complete_purchase_request))
        .route("/:id", delete(delete_purchase_request))
}

async fn create_purchase_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreatePurchaseRequestRequest>,
) -> Result<Json<ApiResponse<PurchaseRequest>>, AppError> {
    let controller = PurchaseRequestController::new(&state);
    let response = controller.create(auth.id, request).await?;
    Ok(Json(response))
}

async fn list_purchase_requests(
    State(state): State<AppState>,
    Query(query): Query<PurchaseRequestListQuery>,
) -> Result<Json<Vec<PurchaseRequest>>, AppError> {
    let controller = PurchaseRequestController::new(&state);
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn approve_purchase_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PurchaseRequest>>, AppError> {
    require_staff(&auth)?;
    let controller = PurchaseRequestController::new(&state);
    let response = controller.approve(id, auth.id).await?;
    Ok(Json(response))
}

async fn reject_purchase_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectPurchaseRequestRequest>,
) -> Result<Json<ApiResponse<PurchaseRequest>>, AppError> {
    require_staff(&auth)?;
    let controller = PurchaseRequestController::new(&state);
    let response = controller.reject(id, auth.id, request).await?;
    Ok(Json(response))
}

async fn complete_purchase_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompletePurchaseRequestRequest>,
) -> Result<Json<ApiResponse<PurchaseRequest>>, AppError> {
    require_staff(&auth)?;
    let controller = PurchaseRequestController::new(&state);
    let response = controller.complete(id, auth.id, request).await?;
    Ok(Json(response))
}

async fn delete_purchase_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_staff(&auth)?;
    let controller = PurchaseRequestController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Solicitud de compra eliminada"
    })))
}
