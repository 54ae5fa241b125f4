use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::api_dto::ApiResponse;
use crate::models::alert::Alert;
use crate::models::analytics::{DashboardSummary, FleetStats};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/stats", get(get_stats))
        .route("/alerts", get(get_alerts))
        .route("/refresh", post(refresh_dashboard))
}

async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let controller = DashboardController::new(state.fleet.clone());
    let response = controller.summary(state.clock.now()).await?;
    Ok(Json(response))
}

async fn get_stats(State(state): State<AppState>) -> Result<Json<ApiResponse<FleetStats>>, AppError> {
    let controller = DashboardController::new(state.fleet.clone());
    Ok(Json(controller.stats().await?))
}

async fn get_alerts(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Alert>>>, AppError> {
    let controller = DashboardController::new(state.fleet.clone());
    Ok(Json(controller.alerts().await?))
}

async fn refresh_dashboard(State(state): State<AppState>) -> Json<ApiResponse<()>> {
    let controller = DashboardController::new(state.fleet.clone());
    Json(controller.refresh().await)
}
