//! Rotación de estado de vehículos
//!
//! Ciclo fijo available → rented → maintenance → available. Un estado fuera
//! del ciclo no aparece en el orden y se trata como índice 0 (available).
//!
//! El jitter de combustible que acompaña a algunas acciones del dashboard es
//! una mutación aparte y no determinista; vive aquí para que el llamador lo
//! aplique de forma explícita.

use rand::Rng;

use crate::models::vehicle::VehicleStatus;

/// Orden del ciclo de estados
pub const STATUS_CYCLE: [VehicleStatus; 3] = [
    VehicleStatus::Available,
    VehicleStatus::Rented,
    VehicleStatus::Maintenance,
];

/// Nivel mínimo tras aplicar jitter
pub const JITTER_FUEL_FLOOR: i32 = 10;

/// Siguiente estado del ciclo
pub fn next_status(current: VehicleStatus) -> VehicleStatus {
    match STATUS_CYCLE.iter().position(|s| *s == current) {
        Some(index) => STATUS_CYCLE[(index + 1) % STATUS_CYCLE.len()],
        None => STATUS_CYCLE[0],
    }
}

/// Desplazar el nivel de combustible ±`spread` y limitarlo a [10, 100]
pub fn jitter_fuel<R: Rng + ?Sized>(level: i32, spread: i32, rng: &mut R) -> i32 {
    let spread = spread.abs() as f64;
    let delta = if spread > 0.0 {
        rng.gen_range(-spread..spread)
    } else {
        0.0
    };
    (level as f64 + delta)
        .round()
        .clamp(JITTER_FUEL_FLOOR as f64, 100.0) as i32
}
