use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    AssignRoleRequest, CreateStaffRequest, LoginRequest, LoginResponse, RegisterRequest,
};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::require_admin;
use crate::models::{AuthUser, User};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas públicas: login y registro
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

/// Rutas protegidas: perfil y administración de usuarios
pub fn create_user_admin_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/staff", post(create_staff))
        .route("/:id/role", put(assign_role))
        .route("/:id", delete(delete_user))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<User>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.me(&auth).await?;
    Ok(Json(response))
}

async fn create_staff(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateStaffRequest>,
) -> Result<Json<ApiResponse<Uuid>>, AppError> {
    require_admin(&auth)?;
    let controller = AuthController::new(&state);
    let response = controller.create_staff(request).await?;
    Ok(Json(response))
}

async fn assign_role(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignRoleRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    require_admin(&auth)?;
    let controller = AuthController::new(&state);
    let response = controller.assign_role(id, request).await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_admin(&auth)?;
    let controller = AuthController::new(&state);
    controller.delete_user(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Usuario eliminado exitosamente"
    })))
}
