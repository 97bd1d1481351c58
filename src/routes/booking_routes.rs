use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::controllers::payment_controller::PaymentController;
use crate::dto::booking_dto::{BookingListQuery, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::dto::common_dto::{ApiResponse, CachedResponse};
use crate::models::{AuthUser, Booking, Payment};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/", get(list_bookings))
        .route("/:id", get(get_booking))
        .route("/:id/status", put(update_booking_status))
        .route("/:id", delete(delete_booking))
        .route("/:id/payments", get(list_booking_payments))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.create(auth.id, request).await?;
    Ok(Json(response))
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<CachedResponse<Vec<Booking>>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}

async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = BookingController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Reserva eliminada exitosamente"
    })))
}

async fn list_booking_payments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let controller = PaymentController::new(&state);
    let response = controller.list_by_booking(id).await?;
    Ok(Json(response))
}
