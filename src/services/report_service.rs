//! Exportación de tasks (CSV) e informe de combustible (texto plano)
//!
//! Ambos artefactos se generan desde las colecciones en memoria, sin ida y
//! vuelta al record store. Una colección vacía no produce fichero sino un
//! aviso para el usuario.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::fuel::FuelRecord;
use crate::models::task::Task;

pub const TASKS_CSV_HEADER: &str = "ID,Vehicle,Type,Priority,Assigned,Description,Created,Status";

/// Aviso de exportación vacía
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("No tasks to export")]
    NoTasks,

    #[error("No fuel records to generate report")]
    NoFuelRecords,
}

/// Fichero listo para descargar
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub content: String,
}

/// Exportar tasks a CSV (`rentxotic-tasks-<fecha>.csv`)
pub fn export_tasks_csv(tasks: &[Task], now: DateTime<Utc>) -> Result<ExportFile, ReportError> {
    if tasks.is_empty() {
        return Err(ReportError::NoTasks);
    }

    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(TASKS_CSV_HEADER.to_string());

    for task in tasks {
        let row = [
            task.id.to_string(),
            csv_field(&task.vehicle_name),
            csv_field(task.task_type.as_str()),
            csv_field(task.priority.as_str()),
            csv_field(&task.assigned),
            quoted(&task.description),
            task.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            task.status_label().to_string(),
        ];
        lines.push(row.join(","));
    }

    Ok(ExportFile {
        file_name: format!("rentxotic-tasks-{}.csv", now.format("%Y-%m-%d")),
        content_type: "text/csv",
        content: lines.join("\n"),
    })
}

/// Acumulado por vehículo del informe de combustible
#[derive(Debug, Clone, Default, PartialEq)]
struct VehicleFuelTotals {
    total_cost: f64,
    total_gallons: f64,
    record_count: usize,
}

/// Generar el informe de combustible (`rentxotic-fuel-report-<fecha>.txt`)
pub fn generate_fuel_report(records: &[FuelRecord], now: DateTime<Utc>) -> Result<ExportFile, ReportError> {
    if records.is_empty() {
        return Err(ReportError::NoFuelRecords);
    }

    let total_cost: f64 = records.iter().map(|r| r.total_cost).sum();
    let total_gallons: f64 = records.iter().map(|r| r.amount).sum();
    let avg_cost_per_gallon = if total_gallons > 0.0 {
        total_cost / total_gallons
    } else {
        0.0
    };

    // Orden de primera aparición, como en el dashboard
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, VehicleFuelTotals> = HashMap::new();
    for record in records {
        let name = record.vehicle_name.as_str();
        let entry = totals.entry(name).or_insert_with(|| {
            order.push(name);
            VehicleFuelTotals::default()
        });
        entry.total_cost += record.total_cost;
        entry.total_gallons += record.amount;
        entry.record_count += 1;
    }

    let mut report = format!("Fuel Report - {}\n\n", now.format("%-m/%-d/%Y"));
    report.push_str("Overall Statistics:\n");
    report.push_str(&format!("- Total Fuel Cost: ${:.2}\n", total_cost));
    report.push_str(&format!("- Total Gallons: {:.1}\n", total_gallons));
    report.push_str(&format!("- Average Cost per Gallon: ${:.2}\n", avg_cost_per_gallon));
    report.push_str(&format!("- Total Records: {}\n\n", records.len()));
    report.push_str("Vehicle Breakdown:\n");

    for name in order {
        if let Some(data) = totals.get(name) {
            report.push_str(&format!(
                "- {}: ${:.2} ({:.1} gal, {} records)\n",
                name, data.total_cost, data.total_gallons, data.record_count
            ));
        }
    }

    Ok(ExportFile {
        file_name: format!("rentxotic-fuel-report-{}.txt", now.format("%Y-%m-%d")),
        content_type: "text/plain",
        content: report,
    })
}

/// Campo entre comillas dobles, escapando las comillas internas
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Citar solo si el campo rompería la fila
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_string()
    }
}
