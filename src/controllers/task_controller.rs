use std::sync::Arc;

use crate::dto::api_dto::ApiResponse;
use crate::models::task::{NewTask, Task, TaskUpdate};
use crate::services::fleet_service::FleetService;
use crate::services::report_service::{ExportFile, ReportError};
use crate::utils::errors::AppResult;

pub struct TaskController {
    fleet: Arc<FleetService>,
}

impl TaskController {
    pub fn new(fleet: Arc<FleetService>) -> Self {
        Self { fleet }
    }

    pub async fn list(&self) -> AppResult<ApiResponse<Vec<Task>>> {
        let tasks = self.fleet.tasks().await?;
        Ok(ApiResponse::success(tasks.as_ref().clone()))
    }

    pub async fn create(&self, request: NewTask) -> AppResult<ApiResponse<()>> {
        let message = format!("{} task created for {}", request.task_type, request.vehicle_name);
        self.fleet.create_task(request).await?;
        Ok(ApiResponse::ok(message))
    }

    pub async fn update(&self, id: i32, request: TaskUpdate) -> AppResult<ApiResponse<TaskUpdate>> {
        self.fleet.update_task(id, request.clone()).await?;
        Ok(ApiResponse::success_with_message(request, "Task updated".to_string()))
    }

    pub async fn complete(&self, id: i32) -> AppResult<ApiResponse<TaskUpdate>> {
        let update = self.fleet.complete_task(id).await?;
        Ok(ApiResponse::success_with_message(update, "Task completed".to_string()))
    }

    pub async fn delete(&self, id: i32) -> AppResult<ApiResponse<()>> {
        self.fleet.delete_task(id).await?;
        Ok(ApiResponse::ok("Task deleted".to_string()))
    }

    pub async fn export_csv(&self) -> AppResult<Result<ExportFile, ReportError>> {
        self.fleet.export_tasks().await
    }
}
