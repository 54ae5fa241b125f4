use serde::{Deserialize, Serialize};

use crate::cache::fleet_cache::CacheStats;
use crate::models::vehicle::VehicleStatus;

// Fallo de un vehículo dentro de una acción masiva
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkFailure {
    pub vehicle_id: i32,
    pub vehicle_name: String,
    pub error: String,
}

// Resultado de "Mark All Ready" / "Update All": sin atomicidad ni compensación
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkOutcome {
    pub updated: Vec<i32>,
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// Resultado de rotar el estado de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusRotation {
    pub vehicle_id: i32,
    pub previous: VehicleStatus,
    pub next: VehicleStatus,
    pub fuel_level: i32,
}

// Health check
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub record_store: String,
    pub current_time: String,
    pub clock_running: bool,
    pub cache: CacheStats,
}
