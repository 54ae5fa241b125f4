//! Modelos de Analytics
//!
//! Estadísticas agregadas del dashboard. Se derivan del snapshot en memoria
//! y no se persisten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::alert::Alert;

/// Resumen de flota y tasks
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total_vehicles: usize,
    pub available: usize,
    pub rented: usize,
    pub maintenance: usize,
    pub washed: usize,
    pub needs_wash: usize,
    /// Suma de `issues.len()` sobre toda la flota
    pub issues: usize,
    /// Vehículos con `fuelLevel < 25`
    pub low_fuel: usize,
    /// Tasks urgentes sin completar
    pub urgent_tasks: usize,
    pub active_tasks: usize,
    pub completed_tasks: usize,
    pub available_percent: u32,
    pub utilization: u32,
}

/// Estadísticas de combustible
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelStats {
    pub total_cost: f64,
    /// Media simple de `pricePerGallon` por registro
    pub avg_cost_per_gallon: f64,
    pub low_fuel_vehicles: usize,
    pub record_count: usize,
}

/// Resumen completo para el dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: FleetStats,
    pub fuel: FuelStats,
    pub alerts: Vec<Alert>,
    pub current_time: DateTime<Utc>,
}
