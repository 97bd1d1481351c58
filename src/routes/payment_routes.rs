use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::payment_controller::PaymentController;
use crate::dto::common_dto::{ApiResponse, CachedResponse};
use crate::dto::payment_dto::{CreatePaymentRequest, UpdatePaymentStatusRequest};
use crate::models::Payment;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_payment))
        .route("/", get(list_payments))
        .route("/:id/status", put(update_payment_status))
}

async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, AppError> {
    let controller = PaymentController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_payments(
    State(state): State<AppState>,
) -> Result<Json<CachedResponse<Vec<Payment>>>, AppError> {
    let controller = PaymentController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<ApiResponse<Payment>>, AppError> {
    let controller = PaymentController::new(&state);
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}
