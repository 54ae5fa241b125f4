use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::task_controller::TaskController;
use crate::dto::api_dto::ApiResponse;
use crate::models::task::{NewTask, Task, TaskUpdate};
use crate::routes::download_response;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_task_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/export", get(export_tasks))
        .route("/:id", put(update_task).delete(delete_task))
        .route("/:id/complete", post(complete_task))
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Task>>>, AppError> {
    let controller = TaskController::new(state.fleet.clone());
    Ok(Json(controller.list().await?))
}

async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<NewTask>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TaskController::new(state.fleet.clone());
    Ok(Json(controller.create(request).await?))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<TaskUpdate>,
) -> Result<Json<ApiResponse<TaskUpdate>>, AppError> {
    let controller = TaskController::new(state.fleet.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<TaskUpdate>>, AppError> {
    let controller = TaskController::new(state.fleet.clone());
    Ok(Json(controller.complete(id).await?))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TaskController::new(state.fleet.clone());
    Ok(Json(controller.delete(id).await?))
}

async fn export_tasks(State(state): State<AppState>) -> Result<Response, AppError> {
    let controller = TaskController::new(state.fleet.clone());
    Ok(download_response(controller.export_csv().await?))
}
