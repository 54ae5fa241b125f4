use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::dto::api_dto::ApiResponse;
use crate::models::alert::Alert;
use crate::models::analytics::{DashboardSummary, FleetStats};
use crate::services::fleet_service::FleetService;
use crate::utils::errors::AppResult;

pub struct DashboardController {
    fleet: Arc<FleetService>,
}

impl DashboardController {
    pub fn new(fleet: Arc<FleetService>) -> Self {
        Self { fleet }
    }

    pub async fn summary(&self, now: DateTime<Utc>) -> AppResult<ApiResponse<DashboardSummary>> {
        let summary = self.fleet.dashboard(now).await?;
        Ok(ApiResponse::success(summary))
    }

    pub async fn stats(&self) -> AppResult<ApiResponse<FleetStats>> {
        Ok(ApiResponse::success(self.fleet.stats().await?))
    }

    pub async fn alerts(&self) -> AppResult<ApiResponse<Vec<Alert>>> {
        let alerts = self.fleet.alerts().await?;
        let message = format!("{} alertas activas", alerts.len());
        Ok(ApiResponse::success_with_message(alerts, message))
    }

    /// Botón "Refresh": la siguiente lectura vuelve al record store
    pub async fn refresh(&self) -> ApiResponse<()> {
        self.fleet.refresh().await;
        ApiResponse::ok("Dashboard refreshed".to_string())
    }
}
