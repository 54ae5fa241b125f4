//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea el JSON que devuelve el record store (`/api/vehicles`), con defaults
//! explícitos para los campos que el ORM deja opcionales.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::null_as_default;

/// Ubicación por defecto del schema (`vehicles.location`)
pub const DEFAULT_LOCATION: &str = "La Jolla Office";

/// Estado del vehículo - ciclo available → rented → maintenance
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Available,
    Rented,
    Maintenance,
    /// El record store no valida el campo: cualquier otro string cae aquí
    #[serde(other)]
    Unknown,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Unknown => "unknown",
        }
    }

    /// Parsear el filtro de estado de la UI (`all` no es un estado)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Some(VehicleStatus::Available),
            "rented" => Some(VehicleStatus::Rented),
            "maintenance" => Some(VehicleStatus::Maintenance),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condición del vehículo
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCondition {
    #[default]
    Excellent,
    Good,
    Fair,
    #[serde(other)]
    Unknown,
}

/// Los payloads de escritura no pueden llevar un estado fuera del schema
fn known_status(status: &VehicleStatus) -> Result<(), ValidationError> {
    match status {
        VehicleStatus::Unknown => Err(ValidationError::new("unknown_status")),
        _ => Ok(()),
    }
}

fn known_condition(condition: &VehicleCondition) -> Result<(), ValidationError> {
    match condition {
        VehicleCondition::Unknown => Err(ValidationError::new("unknown_condition")),
        _ => Ok(()),
    }
}

fn default_fuel_level() -> i32 {
    100
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

/// Vehicle principal - snapshot de solo lectura de un registro del record store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: VehicleStatus,
    #[serde(default = "default_fuel_level")]
    pub fuel_level: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub condition: VehicleCondition,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub mileage: i32,
    #[serde(default)]
    pub last_service: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<String>,
    #[serde(default)]
    pub washed: bool,
    #[serde(default)]
    pub last_wash: Option<DateTime<Utc>>,
}

impl Vehicle {
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Request para crear un nuevo vehículo (`POST /api/vehicles`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub vehicle_type: String,

    #[validate(length(min = 1, max = 50))]
    pub color: String,

    #[serde(default)]
    #[validate(custom = "known_status")]
    pub status: VehicleStatus,

    #[serde(default = "default_fuel_level")]
    #[validate(range(min = 0, max = 100))]
    pub fuel_level: i32,

    #[serde(default)]
    #[validate(custom = "known_condition")]
    pub condition: VehicleCondition,

    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub mileage: i32,

    #[serde(default)]
    pub issues: Vec<String>,

    #[serde(default)]
    pub washed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_wash: Option<DateTime<Utc>>,
}

/// Update parcial de un vehículo (`PUT /api/vehicles/{id}`)
///
/// Solo se serializan los campos presentes: el record store aplica
/// actualizaciones campo a campo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "known_status")]
    pub status: Option<VehicleStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 100))]
    pub fuel_level: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "known_condition")]
    pub condition: Option<VehicleCondition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub washed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_wash: Option<DateTime<Utc>>,
}

impl VehicleUpdate {
    pub fn is_empty(&self) -> bool {
        *self == VehicleUpdate::default()
    }
}

/// Filtros del listado de flota (búsqueda libre + estado)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    pub search: Option<String>,
    /// `all` o uno de los tres estados
    pub status: Option<String>,
}
