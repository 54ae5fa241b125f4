//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean el JSON del record
//! store (vehicles, tasks, fuel records) y los tipos derivados del dashboard.

pub mod alert;
pub mod analytics;
pub mod fuel;
pub mod task;
pub mod vehicle;

pub use alert::{Alert, AlertSeverity};
pub use analytics::{DashboardSummary, FleetStats, FuelStats};
pub use fuel::{FuelRecord, FuelStation};
pub use task::{NewTask, Task, TaskPriority, TaskType, TaskUpdate};
pub use vehicle::{NewVehicle, Vehicle, VehicleCondition, VehicleFilters, VehicleStatus, VehicleUpdate};
