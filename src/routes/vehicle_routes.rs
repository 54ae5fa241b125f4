use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::api_dto::ApiResponse;
use crate::dto::fleet_dto::{BulkOutcome, StatusRotation};
use crate::models::task::NewTask;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleFilters, VehicleUpdate};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/ready-all", post(mark_all_ready))
        .route("/refresh-fuel", post(refresh_all_fuel))
        .route("/:id", put(update_vehicle))
        .route("/:id/rotate-status", post(rotate_status))
        .route("/:id/ready", post(mark_ready))
        .route("/:id/washed", post(mark_washed))
        .route("/:id/fuel-task", post(create_fuel_task))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let controller = VehicleController::new(state.fleet.clone());
    Ok(Json(controller.list(filters).await?))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<NewVehicle>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(state.fleet.clone());
    Ok(Json(controller.create(request).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<VehicleUpdate>,
) -> Result<Json<ApiResponse<VehicleUpdate>>, AppError> {
    let controller = VehicleController::new(state.fleet.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn rotate_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<StatusRotation>>, AppError> {
    let controller = VehicleController::new(state.fleet.clone());
    Ok(Json(controller.rotate_status(id).await?))
}

async fn mark_ready(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<VehicleUpdate>>, AppError> {
    let controller = VehicleController::new(state.fleet.clone());
    Ok(Json(controller.mark_ready(id).await?))
}

async fn mark_washed(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<VehicleUpdate>>, AppError> {
    let controller = VehicleController::new(state.fleet.clone());
    Ok(Json(controller.mark_washed(id).await?))
}

async fn create_fuel_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<NewTask>>, AppError> {
    let controller = VehicleController::new(state.fleet.clone());
    Ok(Json(controller.create_fuel_task(id).await?))
}

async fn mark_all_ready(State(state): State<AppState>) -> Result<Json<ApiResponse<BulkOutcome>>, AppError> {
    let controller = VehicleController::new(state.fleet.clone());
    Ok(Json(controller.mark_all_ready().await?))
}

async fn refresh_all_fuel(State(state): State<AppState>) -> Result<Json<ApiResponse<BulkOutcome>>, AppError> {
    let controller = VehicleController::new(state.fleet.clone());
    Ok(Json(controller.refresh_all_fuel().await?))
}
