use std::sync::Arc;

use serde::Serialize;

use crate::dto::api_dto::ApiResponse;
use crate::models::analytics::FuelStats;
use crate::models::fuel::{FuelRecord, FuelStation};
use crate::services::fleet_service::FleetService;
use crate::services::report_service::{ExportFile, ReportError};
use crate::utils::errors::AppResult;

/// Listado de registros con sus estadísticas
#[derive(Debug, Serialize)]
pub struct FuelRecordsResponse {
    pub records: Vec<FuelRecord>,
    pub stats: FuelStats,
}

pub struct FuelController {
    fleet: Arc<FleetService>,
}

impl FuelController {
    pub fn new(fleet: Arc<FleetService>) -> Self {
        Self { fleet }
    }

    pub async fn list_records(&self) -> AppResult<ApiResponse<FuelRecordsResponse>> {
        let (records, stats) = tokio::try_join!(self.fleet.fuel_records(), self.fleet.fuel_stats())?;
        Ok(ApiResponse::success(FuelRecordsResponse {
            records: records.as_ref().clone(),
            stats,
        }))
    }

    pub async fn list_stations(&self) -> AppResult<ApiResponse<Vec<FuelStation>>> {
        let stations = self.fleet.fuel_stations().await?;
        Ok(ApiResponse::success(stations.as_ref().clone()))
    }

    pub async fn delete_record(&self, id: i32) -> AppResult<ApiResponse<()>> {
        self.fleet.delete_fuel_record(id).await?;
        Ok(ApiResponse::ok("Fuel record deleted".to_string()))
    }

    pub async fn report(&self) -> AppResult<Result<ExportFile, ReportError>> {
        self.fleet.fuel_report().await
    }
}
