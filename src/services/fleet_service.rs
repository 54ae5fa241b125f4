//! Servicio de flota
//!
//! Orquesta cache + record store + lógica pura para las acciones del
//! dashboard. Toda lectura pasa por el cache; toda mutación correcta invalida
//! la colección afectada. Una mutación fallida no toca el cache.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{info, warn};

use crate::cache::fleet_cache::{CacheKey, CacheStats, FleetCache};
use crate::clients::RecordStore;
use crate::config::rules::{FleetRules, ReadyRule, WashRule};
use crate::dto::fleet_dto::{BulkFailure, BulkOutcome, StatusRotation};
use crate::models::alert::Alert;
use crate::models::analytics::{DashboardSummary, FleetStats, FuelStats};
use crate::models::fuel::{FuelRecord, FuelStation};
use crate::models::task::{NewTask, Task, TaskPriority, TaskType, TaskUpdate};
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleFilters, VehicleStatus, VehicleUpdate};
use crate::services::alert_service::generate_alerts;
use crate::services::fleet_stats_service::{compute_fleet_stats, compute_fuel_stats, filter_vehicles};
use crate::services::report_service::{export_tasks_csv, generate_fuel_report, ExportFile, ReportError};
use crate::services::status_rotator::{jitter_fuel, next_status};
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};
use crate::utils::validation::{clamp_fuel_level, validate_payload};

/// Jitter aplicado al rotar el estado de un vehículo
pub const ROTATE_FUEL_SPREAD: i32 = 20;
/// Jitter aplicado por "Update All"
pub const REFRESH_FUEL_SPREAD: i32 = 10;

pub const AUTO_TASK_ASSIGNEE: &str = "Auto-generated";

/// Snapshot inmutable de la flota durante un render
#[derive(Debug, Clone)]
pub struct FleetSnapshot {
    pub vehicles: Arc<Vec<Vehicle>>,
    pub tasks: Arc<Vec<Task>>,
}

pub struct FleetService {
    store: Arc<dyn RecordStore>,
    cache: Arc<FleetCache>,
    rules: FleetRules,
}

impl FleetService {
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<FleetCache>, rules: FleetRules) -> Self {
        Self { store, cache, rules }
    }

    pub fn rules(&self) -> &FleetRules {
        &self.rules
    }

    pub fn cache(&self) -> &FleetCache {
        &self.cache
    }

    // ---------------------------------------------------------------
    // Lecturas
    // ---------------------------------------------------------------

    pub async fn vehicles(&self) -> AppResult<Arc<Vec<Vehicle>>> {
        self.cache
            .load(self.cache.vehicles(), self.store.list_vehicles())
            .await
    }

    pub async fn tasks(&self) -> AppResult<Arc<Vec<Task>>> {
        self.cache.load(self.cache.tasks(), self.store.list_tasks()).await
    }

    pub async fn fuel_records(&self) -> AppResult<Arc<Vec<FuelRecord>>> {
        self.cache
            .load(self.cache.fuel_records(), self.store.list_fuel_records())
            .await
    }

    pub async fn fuel_stations(&self) -> AppResult<Arc<Vec<FuelStation>>> {
        self.cache
            .load(self.cache.fuel_stations(), self.store.list_fuel_stations())
            .await
    }

    pub async fn snapshot(&self) -> AppResult<FleetSnapshot> {
        let (vehicles, tasks) = tokio::try_join!(self.vehicles(), self.tasks())?;
        Ok(FleetSnapshot { vehicles, tasks })
    }

    pub async fn stats(&self) -> AppResult<FleetStats> {
        let snapshot = self.snapshot().await?;
        Ok(compute_fleet_stats(&snapshot.vehicles, &snapshot.tasks))
    }

    pub async fn alerts(&self) -> AppResult<Vec<Alert>> {
        let snapshot = self.snapshot().await?;
        Ok(generate_alerts(
            &snapshot.vehicles,
            &snapshot.tasks,
            self.rules.wash_alert_mode,
        ))
    }

    pub async fn fuel_stats(&self) -> AppResult<FuelStats> {
        let (records, vehicles) = tokio::try_join!(self.fuel_records(), self.vehicles())?;
        Ok(compute_fuel_stats(&records, &vehicles))
    }

    /// Resumen completo del dashboard a la hora del reloj
    pub async fn dashboard(&self, now: DateTime<Utc>) -> AppResult<DashboardSummary> {
        let (vehicles, tasks, records) =
            tokio::try_join!(self.vehicles(), self.tasks(), self.fuel_records())?;
        Ok(DashboardSummary {
            stats: compute_fleet_stats(&vehicles, &tasks),
            fuel: compute_fuel_stats(&records, &vehicles),
            alerts: generate_alerts(&vehicles, &tasks, self.rules.wash_alert_mode),
            current_time: now,
        })
    }

    pub async fn filter_vehicles(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        if let Some(status) = filters.status.as_deref() {
            let status = status.trim();
            if !status.is_empty() && !status.eq_ignore_ascii_case("all") && VehicleStatus::parse(status).is_none() {
                return Err(bad_request_error("status must be all, available, rented or maintenance"));
            }
        }
        let vehicles = self.vehicles().await?;
        Ok(filter_vehicles(&vehicles, filters).into_iter().cloned().collect())
    }

    async fn find_vehicle(&self, id: i32) -> AppResult<Vehicle> {
        self.vehicles()
            .await?
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    /// Toda task debe apuntar a un vehículo existente
    async fn ensure_vehicle_exists(&self, id: i32) -> AppResult<()> {
        if self.vehicles().await?.iter().any(|v| v.id == id) {
            Ok(())
        } else {
            Err(not_found_error("Vehicle", id))
        }
    }

    // ---------------------------------------------------------------
    // Acciones sobre vehículos
    // ---------------------------------------------------------------

    pub async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<()> {
        validate_payload(&vehicle)?;
        self.store.create_vehicle(&vehicle).await?;
        self.cache.invalidate(CacheKey::Vehicles).await;
        info!("🚗 Vehículo creado: {}", vehicle.name);
        Ok(())
    }

    pub async fn update_vehicle(&self, id: i32, update: VehicleUpdate) -> AppResult<()> {
        if update.is_empty() {
            return Err(bad_request_error("Vehicle update has no fields"));
        }
        validate_payload(&update)?;
        self.store.update_vehicle(id, &update).await?;
        self.cache.invalidate(CacheKey::Vehicles).await;
        Ok(())
    }

    /// Rotar el estado y aplicar jitter de combustible en la misma llamada
    pub async fn rotate_status(&self, id: i32) -> AppResult<StatusRotation> {
        let vehicle = self.find_vehicle(id).await?;
        let next = next_status(vehicle.status);
        let fuel_level = jitter_fuel(vehicle.fuel_level, ROTATE_FUEL_SPREAD, &mut rand::thread_rng());

        let update = VehicleUpdate {
            status: Some(next),
            fuel_level: Some(fuel_level),
            ..Default::default()
        };
        self.store.update_vehicle(id, &update).await?;
        self.cache.invalidate(CacheKey::Vehicles).await;

        info!("🔄 {} : {} → {}", vehicle.name, vehicle.status, next);
        Ok(StatusRotation {
            vehicle_id: id,
            previous: vehicle.status,
            next,
            fuel_level,
        })
    }

    pub async fn mark_ready(&self, id: i32) -> AppResult<VehicleUpdate> {
        let vehicle = self.find_vehicle(id).await?;
        let update = ready_update(&vehicle, &self.rules.ready, self.rules.ready.min_fuel_level);
        self.store.update_vehicle(id, &update).await?;
        self.cache.invalidate(CacheKey::Vehicles).await;
        info!("✅ {} marcado como listo", vehicle.name);
        Ok(update)
    }

    /// Un PUT independiente por vehículo, en paralelo y sin orden garantizado
    pub async fn mark_all_ready(&self) -> AppResult<BulkOutcome> {
        let vehicles = self.vehicles().await?;
        let rule = &self.rules.ready;
        let updates: Vec<(&Vehicle, VehicleUpdate)> = vehicles
            .iter()
            .map(|v| (v, ready_update(v, rule, rule.bulk_min_fuel_level)))
            .collect();

        let outcome = self.apply_bulk(updates).await;
        info!(
            "✅ Mark All Ready: {} actualizados, {} fallidos",
            outcome.updated.len(),
            outcome.failed.len()
        );
        Ok(outcome)
    }

    /// "Update All": jitter de ±10 sobre el combustible de cada vehículo
    pub async fn refresh_all_fuel(&self) -> AppResult<BulkOutcome> {
        let vehicles = self.vehicles().await?;
        let updates: Vec<(&Vehicle, VehicleUpdate)> = {
            let mut rng = rand::thread_rng();
            vehicles
                .iter()
                .map(|v| {
                    let update = VehicleUpdate {
                        fuel_level: Some(jitter_fuel(v.fuel_level, REFRESH_FUEL_SPREAD, &mut rng)),
                        ..Default::default()
                    };
                    (v, update)
                })
                .collect()
        };

        let outcome = self.apply_bulk(updates).await;
        info!(
            "⛽ Update All: {} actualizados, {} fallidos",
            outcome.updated.len(),
            outcome.failed.len()
        );
        Ok(outcome)
    }

    async fn apply_bulk(&self, updates: Vec<(&Vehicle, VehicleUpdate)>) -> BulkOutcome {
        let results = join_all(updates.iter().map(|(vehicle, update)| async move {
            (*vehicle, self.store.update_vehicle(vehicle.id, update).await)
        }))
        .await;

        let mut outcome = BulkOutcome::default();
        for (vehicle, result) in results {
            match result {
                Ok(()) => outcome.updated.push(vehicle.id),
                Err(e) => {
                    warn!("❌ Update de {} (id {}) falló: {}", vehicle.name, vehicle.id, e);
                    outcome.failed.push(BulkFailure {
                        vehicle_id: vehicle.id,
                        vehicle_name: vehicle.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if !outcome.updated.is_empty() {
            self.cache.invalidate(CacheKey::Vehicles).await;
        }
        outcome
    }

    pub async fn mark_washed(&self, id: i32) -> AppResult<VehicleUpdate> {
        let vehicle = self.find_vehicle(id).await?;
        let update = washed_update(&vehicle, &self.rules.wash);
        self.store.update_vehicle(id, &update).await?;
        self.cache.invalidate(CacheKey::Vehicles).await;
        info!("🧽 {} lavado", vehicle.name);
        Ok(update)
    }

    /// Crear una task de repostaje para el vehículo
    pub async fn create_fuel_task(&self, id: i32) -> AppResult<NewTask> {
        let vehicle = self.find_vehicle(id).await?;
        let task = fuel_task_for(&vehicle);
        validate_payload(&task)?;
        self.store.create_task(&task).await?;
        self.cache.invalidate(CacheKey::Tasks).await;
        info!("⛽ Task de repostaje creada para {}", vehicle.name);
        Ok(task)
    }

    // ---------------------------------------------------------------
    // Tasks
    // ---------------------------------------------------------------

    pub async fn create_task(&self, task: NewTask) -> AppResult<()> {
        validate_payload(&task)?;
        self.ensure_vehicle_exists(task.vehicle_id).await?;
        self.store.create_task(&task).await?;
        self.cache.invalidate(CacheKey::Tasks).await;
        Ok(())
    }

    /// Update genérico: se envía tal cual
    ///
    /// `completed = true` sin `completedAt` queda así en el record store;
    /// solo se registra un aviso. `complete_task` sella la fecha.
    pub async fn update_task(&self, id: i32, update: TaskUpdate) -> AppResult<()> {
        if update.is_empty() {
            return Err(bad_request_error("Task update has no fields"));
        }
        validate_payload(&update)?;
        if let Some(vehicle_id) = update.vehicle_id {
            self.ensure_vehicle_exists(vehicle_id).await?;
        }
        if update.completes_without_timestamp() {
            warn!("⚠️ Task {} marcada completed sin completedAt", id);
        }
        self.store.update_task(id, &update).await?;
        self.cache.invalidate(CacheKey::Tasks).await;
        Ok(())
    }

    /// Mutación dedicada: completed = true y completedAt = ahora
    pub async fn complete_task(&self, id: i32) -> AppResult<TaskUpdate> {
        let update = TaskUpdate {
            completed: Some(true),
            completed_at: Some(Utc::now()),
            ..Default::default()
        };
        self.store.update_task(id, &update).await?;
        self.cache.invalidate(CacheKey::Tasks).await;
        info!("✅ Task {} completada", id);
        Ok(update)
    }

    pub async fn delete_task(&self, id: i32) -> AppResult<()> {
        self.store.delete_task(id).await?;
        self.cache.invalidate(CacheKey::Tasks).await;
        info!("🗑️ Task {} eliminada", id);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Combustible y exportaciones
    // ---------------------------------------------------------------

    pub async fn delete_fuel_record(&self, id: i32) -> AppResult<()> {
        self.store.delete_fuel_record(id).await?;
        self.cache.invalidate(CacheKey::FuelRecords).await;
        Ok(())
    }

    /// CSV de tasks; `Ok(Err(..))` es el aviso de exportación vacía
    pub async fn export_tasks(&self) -> AppResult<Result<ExportFile, ReportError>> {
        let tasks = self.tasks().await?;
        Ok(export_tasks_csv(&tasks, Utc::now()))
    }

    pub async fn fuel_report(&self) -> AppResult<Result<ExportFile, ReportError>> {
        let records = self.fuel_records().await?;
        Ok(generate_fuel_report(&records, Utc::now()))
    }

    /// Botón "Refresh": marcar todas las colecciones como stale
    pub async fn refresh(&self) {
        self.cache.invalidate_all().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.get_stats().await
    }
}

/// Update de "mark ready" según la regla configurada
pub fn ready_update(vehicle: &Vehicle, rule: &ReadyRule, min_fuel_level: i32) -> VehicleUpdate {
    VehicleUpdate {
        status: Some(VehicleStatus::Available),
        fuel_level: Some(clamp_fuel_level(vehicle.fuel_level.max(min_fuel_level))),
        condition: Some(rule.condition),
        issues: Some(rule.clear_issues.apply(&vehicle.issues)),
        ..Default::default()
    }
}

pub fn washed_update(vehicle: &Vehicle, rule: &WashRule) -> VehicleUpdate {
    VehicleUpdate {
        washed: Some(true),
        last_wash: Some(Utc::now()),
        issues: Some(rule.clear_issues.apply(&vehicle.issues)),
        ..Default::default()
    }
}

pub fn fuel_task_for(vehicle: &Vehicle) -> NewTask {
    NewTask {
        vehicle_id: vehicle.id,
        vehicle_name: vehicle.name.clone(),
        task_type: TaskType::Fuel,
        priority: TaskPriority::High,
        assigned: AUTO_TASK_ASSIGNEE.to_string(),
        description: format!("Refuel {} - Currently at {}%", vehicle.name, vehicle.fuel_level),
        completed: false,
    }
}
