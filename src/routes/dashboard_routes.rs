use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::common_dto::CachedResponse;
use crate::models::DashboardReport;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard_report))
}

async fn get_dashboard_report(
    State(state): State<AppState>,
) -> Result<Json<CachedResponse<DashboardReport>>, AppError> {
    let controller = DashboardController::new(&state);
    let response = controller.report().await?;
    Ok(Json(response))
}
