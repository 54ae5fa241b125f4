//! Generador de alertas
//!
//! Convierte el snapshot actual en una lista ordenada de alertas:
//! combustible crítico, combustible bajo, lavado pendiente y tasks urgentes,
//! en ese orden. Sin estado interno: cada llamada recalcula desde cero.

use crate::config::rules::WashAlertMode;
use crate::models::alert::Alert;
use crate::models::task::Task;
use crate::models::vehicle::Vehicle;
use crate::services::fleet_stats_service::LOW_FUEL_THRESHOLD;

/// Por debajo de este nivel el combustible es crítico (15 ya es "bajo")
pub const CRITICAL_FUEL_THRESHOLD: i32 = 15;

pub fn generate_alerts(vehicles: &[Vehicle], tasks: &[Task], wash_mode: WashAlertMode) -> Vec<Alert> {
    let mut alerts = Vec::new();

    alerts.extend(
        vehicles
            .iter()
            .filter(|v| v.fuel_level < CRITICAL_FUEL_THRESHOLD)
            .map(|v| Alert::danger(format!("⛽ {} fuel critical ({}%)", v.name, v.fuel_level))),
    );

    alerts.extend(
        vehicles
            .iter()
            .filter(|v| (CRITICAL_FUEL_THRESHOLD..LOW_FUEL_THRESHOLD).contains(&v.fuel_level))
            .map(|v| Alert::warning(format!("⚠️ {} fuel low ({}%)", v.name, v.fuel_level))),
    );

    match wash_mode {
        WashAlertMode::Aggregate => {
            let needs_wash = vehicles.iter().filter(|v| !v.washed).count();
            if needs_wash > 0 {
                alerts.push(Alert::warning(format!(
                    "🧽 {} vehicle(s) need washing",
                    needs_wash
                )));
            }
        }
        WashAlertMode::PerVehicle => {
            alerts.extend(
                vehicles
                    .iter()
                    .filter(|v| !v.washed)
                    .map(|v| Alert::warning(format!("🧽 {} needs washing", v.name))),
            );
        }
    }

    let urgent = tasks.iter().filter(|t| t.is_urgent_pending()).count();
    if urgent > 0 {
        alerts.push(Alert::danger(format!(
            "🚨 {} urgent task(s) need attention",
            urgent
        )));
    }

    alerts
}
