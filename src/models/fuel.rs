//! Registros de combustible y estaciones
//!
//! Tipos definidos por el record store fuera del schema principal; aquí solo
//! se fijan los campos que consume el informe de combustible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelRecord {
    pub id: i32,
    #[serde(default)]
    pub vehicle_id: Option<i32>,
    pub vehicle_name: String,
    /// Galones repostados
    pub amount: f64,
    pub total_cost: f64,
    pub price_per_gallon: f64,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub station: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelStation {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub price_per_gallon: Option<f64>,
}
