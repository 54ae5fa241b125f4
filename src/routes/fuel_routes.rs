use axum::{
    extract::{Path, State},
    response::Response,
    routing::{delete, get},
    Json, Router,
};

use crate::controllers::fuel_controller::{FuelController, FuelRecordsResponse};
use crate::dto::api_dto::ApiResponse;
use crate::models::fuel::FuelStation;
use crate::routes::download_response;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fuel_router() -> Router<AppState> {
    Router::new()
        .route("/api/fuel-records", get(list_fuel_records))
        .route("/api/fuel-records/report", get(fuel_report))
        .route("/api/fuel-records/:id", delete(delete_fuel_record))
        .route("/api/fuel-stations", get(list_fuel_stations))
}

async fn list_fuel_records(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FuelRecordsResponse>>, AppError> {
    let controller = FuelController::new(state.fleet.clone());
    Ok(Json(controller.list_records().await?))
}

async fn delete_fuel_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = FuelController::new(state.fleet.clone());
    Ok(Json(controller.delete_record(id).await?))
}

async fn fuel_report(State(state): State<AppState>) -> Result<Response, AppError> {
    let controller = FuelController::new(state.fleet.clone());
    Ok(download_response(controller.report().await?))
}

async fn list_fuel_stations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FuelStation>>>, AppError> {
    let controller = FuelController::new(state.fleet.clone());
    Ok(Json(controller.list_stations().await?))
}
