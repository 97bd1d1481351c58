use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::customer_controller::CustomerController;
use crate::dto::common_dto::{ApiResponse, CachedResponse};
use crate::dto::customer_dto::{CreateCustomerRequest, CustomerSearchQuery, UpdateCustomerRequest};
use crate::models::Customer;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer))
        .route("/", get(list_customers))
        .route("/:id", get(get_customer))
        .route("/:id", put(update_customer))
        .route("/:id", delete(delete_customer))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let controller = CustomerController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerSearchQuery>,
) -> Result<Json<CachedResponse<Vec<Customer>>>, AppError> {
    let controller = CustomerController::new(&state);
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, AppError> {
    let controller = CustomerController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let controller = CustomerController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = CustomerController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cliente eliminado exitosamente"
    })))
}
