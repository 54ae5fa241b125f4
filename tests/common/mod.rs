//! Record store en memoria y fixtures compartidos por los tests de integración

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::Router;
use chrono::{TimeZone, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use tokio::sync::oneshot;
use tower::ServiceExt;

use rentxotic_fleet::cache::FleetCache;
use rentxotic_fleet::clients::RecordStore;
use rentxotic_fleet::config::environment::EnvironmentConfig;
use rentxotic_fleet::config::rules::FleetRules;
use rentxotic_fleet::models::fuel::{FuelRecord, FuelStation};
use rentxotic_fleet::models::task::{NewTask, Task, TaskPriority, TaskType, TaskUpdate};
use rentxotic_fleet::models::vehicle::{
    NewVehicle, Vehicle, VehicleCondition, VehicleStatus, VehicleUpdate, DEFAULT_LOCATION,
};
use rentxotic_fleet::routes::create_app;
use rentxotic_fleet::services::{DisplayClock, FleetService};
use rentxotic_fleet::state::AppState;
use rentxotic_fleet::utils::errors::{AppError, AppResult};

#[derive(Default)]
pub struct InMemoryRecordStore {
    pub vehicles: Mutex<Vec<Vehicle>>,
    pub tasks: Mutex<Vec<Task>>,
    pub fuel_records: Mutex<Vec<FuelRecord>>,
    pub fuel_stations: Mutex<Vec<FuelStation>>,
    failing_vehicles: Mutex<HashSet<i32>>,
    offline: AtomicBool,
    vehicle_gate: Mutex<Option<(oneshot::Sender<()>, oneshot::Receiver<()>)>>,
    pub vehicle_reads: AtomicUsize,
    pub task_reads: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn with_fleet(vehicles: Vec<Vehicle>, tasks: Vec<Task>) -> Self {
        let store = Self::default();
        *store.vehicles.lock().unwrap() = vehicles;
        *store.tasks.lock().unwrap() = tasks;
        store
    }

    /// Los PUT de este vehículo fallan con 500
    pub fn fail_updates_for(&self, id: i32) {
        self.failing_vehicles.lock().unwrap().insert(id);
    }

    /// Simular que el record store no responde a los listados
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// La próxima lectura de vehículos toma su snapshot, avisa por el primer
    /// canal y espera al segundo antes de responder
    pub fn gate_next_vehicle_read(&self) -> (oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        *self.vehicle_gate.lock().unwrap() = Some((started_tx, release_rx));
        (started_rx, release_tx)
    }

    pub fn vehicle(&self, id: i32) -> Vehicle {
        self.vehicles
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .unwrap()
    }

    pub fn task(&self, id: i32) -> Task {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .unwrap()
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::ExternalApi("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.check_online()?;
        self.vehicle_reads.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.vehicles.lock().unwrap().clone();
        let gate = self.vehicle_gate.lock().unwrap().take();
        if let Some((started, release)) = gate {
            let _ = started.send(());
            let _ = release.await;
        }
        Ok(snapshot)
    }

    async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        self.check_online()?;
        self.task_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn list_fuel_records(&self) -> AppResult<Vec<FuelRecord>> {
        self.check_online()?;
        Ok(self.fuel_records.lock().unwrap().clone())
    }

    async fn list_fuel_stations(&self) -> AppResult<Vec<FuelStation>> {
        self.check_online()?;
        Ok(self.fuel_stations.lock().unwrap().clone())
    }

    async fn create_vehicle(&self, vehicle: &NewVehicle) -> AppResult<()> {
        let mut vehicles = self.vehicles.lock().unwrap();
        let id = vehicles.iter().map(|v| v.id).max().unwrap_or(0) + 1;
        vehicles.push(Vehicle {
            id,
            name: vehicle.name.clone(),
            vehicle_type: vehicle.vehicle_type.clone(),
            color: vehicle.color.clone(),
            status: vehicle.status,
            fuel_level: vehicle.fuel_level,
            condition: vehicle.condition,
            location: vehicle.location.clone(),
            mileage: vehicle.mileage,
            last_service: None,
            issues: vehicle.issues.clone(),
            washed: vehicle.washed,
            last_wash: vehicle.last_wash,
        });
        Ok(())
    }

    async fn update_vehicle(&self, id: i32, update: &VehicleUpdate) -> AppResult<()> {
        if self.failing_vehicles.lock().unwrap().contains(&id) {
            return Err(AppError::ExternalApi(format!("HTTP 500 from /api/vehicles/{}", id)));
        }

        let mut vehicles = self.vehicles.lock().unwrap();
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound(format!("/api/vehicles/{} not found", id)))?;

        let update = update.clone();
        if let Some(name) = update.name {
            vehicle.name = name;
        }
        if let Some(vehicle_type) = update.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(color) = update.color {
            vehicle.color = color;
        }
        if let Some(status) = update.status {
            vehicle.status = status;
        }
        if let Some(fuel_level) = update.fuel_level {
            vehicle.fuel_level = fuel_level;
        }
        if let Some(condition) = update.condition {
            vehicle.condition = condition;
        }
        if let Some(location) = update.location {
            vehicle.location = location;
        }
        if let Some(mileage) = update.mileage {
            vehicle.mileage = mileage;
        }
        if let Some(issues) = update.issues {
            vehicle.issues = issues;
        }
        if let Some(washed) = update.washed {
            vehicle.washed = washed;
        }
        if update.last_wash.is_some() {
            vehicle.last_wash = update.last_wash;
        }
        Ok(())
    }

    async fn create_task(&self, task: &NewTask) -> AppResult<()> {
        let mut tasks = self.tasks.lock().unwrap();
        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        tasks.push(Task {
            id,
            vehicle_id: task.vehicle_id,
            vehicle_name: task.vehicle_name.clone(),
            task_type: task.task_type,
            priority: task.priority,
            assigned: task.assigned.clone(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: Utc::now(),
            completed_at: None,
        });
        Ok(())
    }

    async fn update_task(&self, id: i32, update: &TaskUpdate) -> AppResult<()> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("/api/tasks/{} not found", id)))?;

        let update = update.clone();
        if let Some(vehicle_id) = update.vehicle_id {
            task.vehicle_id = vehicle_id;
        }
        if let Some(vehicle_name) = update.vehicle_name {
            task.vehicle_name = vehicle_name;
        }
        if let Some(task_type) = update.task_type {
            task.task_type = task_type;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(assigned) = update.assigned {
            task.assigned = assigned;
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(completed) = update.completed {
            task.completed = completed;
        }
        if update.completed_at.is_some() {
            task.completed_at = update.completed_at;
        }
        Ok(())
    }

    async fn delete_task(&self, id: i32) -> AppResult<()> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(AppError::NotFound(format!("/api/tasks/{} not found", id)));
        }
        Ok(())
    }

    async fn delete_fuel_record(&self, id: i32) -> AppResult<()> {
        let mut records = self.fuel_records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(AppError::NotFound(format!("/api/fuel-records/{} not found", id)));
        }
        Ok(())
    }
}

pub fn vehicle(id: i32, name: &str, status: VehicleStatus, fuel_level: i32) -> Vehicle {
    Vehicle {
        id,
        name: name.to_string(),
        vehicle_type: "Supercar".to_string(),
        color: "Black".to_string(),
        status,
        fuel_level,
        condition: VehicleCondition::Good,
        location: DEFAULT_LOCATION.to_string(),
        mileage: 12_000,
        last_service: None,
        issues: Vec::new(),
        washed: true,
        last_wash: None,
    }
}

pub fn task(id: i32, vehicle: &Vehicle, priority: TaskPriority, completed: bool, description: &str) -> Task {
    let created_at = Utc.with_ymd_and_hms(2024, 6, 28, 9, 30, 0).unwrap();
    Task {
        id,
        vehicle_id: vehicle.id,
        vehicle_name: vehicle.name.clone(),
        task_type: TaskType::Service,
        priority,
        assigned: "Marco".to_string(),
        description: description.to_string(),
        completed,
        created_at,
        completed_at: completed.then_some(created_at),
    }
}

pub fn fuel_record(id: i32, vehicle_name: &str, amount: f64, price_per_gallon: f64) -> FuelRecord {
    FuelRecord {
        id,
        vehicle_id: None,
        vehicle_name: vehicle_name.to_string(),
        amount,
        total_cost: amount * price_per_gallon,
        price_per_gallon,
        date: None,
        station: Some("Shell La Jolla".to_string()),
    }
}

/// Flota de referencia: combustible 10 / 20 / 80, un vehículo sin lavar,
/// una task urgente pendiente y otra completada
pub fn reference_store() -> InMemoryRecordStore {
    let ferrari = vehicle(1, "Ferrari 488 GTB", VehicleStatus::Available, 10);
    let lambo = vehicle(2, "Lamborghini Huracán", VehicleStatus::Rented, 20);
    let mut rolls = vehicle(3, "Rolls-Royce Cullinan", VehicleStatus::Maintenance, 80);
    rolls.washed = false;
    rolls.issues = vec!["Needs Wash".to_string(), "Service Due".to_string()];

    let tasks = vec![
        task(1, &ferrari, TaskPriority::Urgent, false, "Refuel before 3pm, client waiting"),
        task(2, &lambo, TaskPriority::Normal, true, "Deliver to \"Hotel del Coronado\""),
    ];

    InMemoryRecordStore::with_fleet(vec![ferrari, lambo, rolls], tasks)
}

pub fn fleet_service(store: Arc<InMemoryRecordStore>, rules: FleetRules) -> FleetService {
    let cache = Arc::new(FleetCache::new(Duration::from_secs(60)));
    FleetService::new(store, cache, rules)
}

/// Router completo sobre el store en memoria; requiere runtime de tokio
pub fn test_app(store: Arc<InMemoryRecordStore>) -> Router {
    let config = EnvironmentConfig::default();
    let fleet = fleet_service(store, config.rules.clone());
    let clock = DisplayClock::start(Duration::from_millis(50));
    create_app(AppState::new(config, fleet, clock))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
