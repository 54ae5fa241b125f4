use std::sync::Arc;

use crate::dto::api_dto::ApiResponse;
use crate::dto::fleet_dto::{BulkOutcome, StatusRotation};
use crate::models::task::NewTask;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleFilters, VehicleUpdate};
use crate::services::fleet_service::FleetService;
use crate::utils::errors::AppResult;

pub struct VehicleController {
    fleet: Arc<FleetService>,
}

impl VehicleController {
    pub fn new(fleet: Arc<FleetService>) -> Self {
        Self { fleet }
    }

    pub async fn list(&self, filters: VehicleFilters) -> AppResult<ApiResponse<Vec<Vehicle>>> {
        let vehicles = self.fleet.filter_vehicles(&filters).await?;
        Ok(ApiResponse::success(vehicles))
    }

    pub async fn create(&self, request: NewVehicle) -> AppResult<ApiResponse<()>> {
        let name = request.name.clone();
        self.fleet.create_vehicle(request).await?;
        Ok(ApiResponse::ok(format!("{} added to the fleet", name)))
    }

    pub async fn update(&self, id: i32, request: VehicleUpdate) -> AppResult<ApiResponse<VehicleUpdate>> {
        self.fleet.update_vehicle(id, request.clone()).await?;
        Ok(ApiResponse::success_with_message(
            request,
            "Vehicle updated".to_string(),
        ))
    }

    pub async fn rotate_status(&self, id: i32) -> AppResult<ApiResponse<StatusRotation>> {
        let rotation = self.fleet.rotate_status(id).await?;
        let message = format!("Status changed to {}", rotation.next);
        Ok(ApiResponse::success_with_message(rotation, message))
    }

    pub async fn mark_ready(&self, id: i32) -> AppResult<ApiResponse<VehicleUpdate>> {
        let update = self.fleet.mark_ready(id).await?;
        Ok(ApiResponse::success_with_message(
            update,
            "Vehicle marked as ready".to_string(),
        ))
    }

    pub async fn mark_washed(&self, id: i32) -> AppResult<ApiResponse<VehicleUpdate>> {
        let update = self.fleet.mark_washed(id).await?;
        Ok(ApiResponse::success_with_message(
            update,
            "Vehicle marked as washed".to_string(),
        ))
    }

    pub async fn create_fuel_task(&self, id: i32) -> AppResult<ApiResponse<NewTask>> {
        let task = self.fleet.create_fuel_task(id).await?;
        Ok(ApiResponse::success_with_message(
            task,
            "Fuel task created".to_string(),
        ))
    }

    pub async fn mark_all_ready(&self) -> AppResult<ApiResponse<BulkOutcome>> {
        let outcome = self.fleet.mark_all_ready().await?;
        Ok(bulk_response(outcome, "marked as ready"))
    }

    pub async fn refresh_all_fuel(&self) -> AppResult<ApiResponse<BulkOutcome>> {
        let outcome = self.fleet.refresh_all_fuel().await?;
        Ok(bulk_response(outcome, "fuel levels updated"))
    }
}

/// Las acciones masivas no son atómicas: `success` solo si no hubo fallos
fn bulk_response(outcome: BulkOutcome, action: &str) -> ApiResponse<BulkOutcome> {
    let message = if outcome.is_complete() {
        format!("{} vehicles {}", outcome.updated.len(), action)
    } else {
        format!(
            "{} vehicles {}, {} failed",
            outcome.updated.len(),
            action,
            outcome.failed.len()
        )
    };

    ApiResponse {
        success: outcome.is_complete(),
        message: Some(message),
        data: Some(outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::fleet_dto::BulkFailure;

    #[test]
    fn test_bulk_response_partial_failure() {
        let outcome = BulkOutcome {
            updated: vec![1, 3],
            failed: vec![BulkFailure {
                vehicle_id: 2,
                vehicle_name: "Bentley Bentayga".to_string(),
                error: "External API error: HTTP 500".to_string(),
            }],
        };

        let response = bulk_response(outcome, "marked as ready");
        assert!(!response.success);
        assert_eq!(
            response.message.as_deref(),
            Some("2 vehicles marked as ready, 1 failed")
        );
    }

    #[test]
    fn test_bulk_response_complete() {
        let response = bulk_response(
            BulkOutcome {
                updated: vec![1, 2],
                failed: Vec::new(),
            },
            "fuel levels updated",
        );
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("2 vehicles fuel levels updated"));
    }
}
