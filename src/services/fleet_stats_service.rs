//! Agregador de estadísticas de flota
//!
//! Funciones puras sobre el snapshot actual: conteos por estado, lavado,
//! issues, combustible bajo y tasks urgentes. Colecciones vacías producen
//! estadísticas a cero.

use crate::models::analytics::{FleetStats, FuelStats};
use crate::models::fuel::FuelRecord;
use crate::models::task::Task;
use crate::models::vehicle::{Vehicle, VehicleFilters, VehicleStatus};
use crate::utils::validation::normalize_search;

/// Umbral de combustible bajo (exclusivo)
pub const LOW_FUEL_THRESHOLD: i32 = 25;

/// Calcular el resumen de flota en una sola pasada por colección
pub fn compute_fleet_stats(vehicles: &[Vehicle], tasks: &[Task]) -> FleetStats {
    let mut stats = FleetStats {
        total_vehicles: vehicles.len(),
        ..Default::default()
    };

    for vehicle in vehicles {
        match vehicle.status {
            VehicleStatus::Available => stats.available += 1,
            VehicleStatus::Rented => stats.rented += 1,
            VehicleStatus::Maintenance => stats.maintenance += 1,
            VehicleStatus::Unknown => {}
        }

        if vehicle.washed {
            stats.washed += 1;
        } else {
            stats.needs_wash += 1;
        }

        stats.issues += vehicle.issue_count();

        if vehicle.fuel_level < LOW_FUEL_THRESHOLD {
            stats.low_fuel += 1;
        }
    }

    for task in tasks {
        if task.completed {
            stats.completed_tasks += 1;
        } else {
            stats.active_tasks += 1;
        }
        if task.is_urgent_pending() {
            stats.urgent_tasks += 1;
        }
    }

    stats.available_percent = percent(stats.available, stats.total_vehicles);
    stats.utilization = percent(stats.rented, stats.total_vehicles);
    stats
}

/// Estadísticas de combustible: coste total y precio medio por registro
pub fn compute_fuel_stats(records: &[FuelRecord], vehicles: &[Vehicle]) -> FuelStats {
    let total_cost: f64 = records.iter().map(|r| r.total_cost).sum();
    let avg_cost_per_gallon = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.price_per_gallon).sum::<f64>() / records.len() as f64
    };

    FuelStats {
        total_cost,
        avg_cost_per_gallon,
        low_fuel_vehicles: vehicles
            .iter()
            .filter(|v| v.fuel_level < LOW_FUEL_THRESHOLD)
            .count(),
        record_count: records.len(),
    }
}

/// Filtrar la flota por búsqueda libre y estado (`all` o vacío = sin filtro)
pub fn filter_vehicles<'a>(vehicles: &'a [Vehicle], filters: &VehicleFilters) -> Vec<&'a Vehicle> {
    let search = normalize_search(filters.search.as_deref());
    let status = filters.status.as_deref().and_then(VehicleStatus::parse);

    vehicles
        .iter()
        .filter(|vehicle| status.map_or(true, |s| vehicle.status == s))
        .filter(|vehicle| match &search {
            Some(term) => [
                vehicle.name.as_str(),
                vehicle.vehicle_type.as_str(),
                vehicle.color.as_str(),
                vehicle.location.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(term.as_str())),
            None => true,
        })
        .collect()
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}
