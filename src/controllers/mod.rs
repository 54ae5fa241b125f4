//! Controllers
//!
//! Capa entre las rutas de Axum y `FleetService`: arma las respuestas
//! `ApiResponse` y los mensajes para la UI.

pub mod dashboard_controller;
pub mod fuel_controller;
pub mod task_controller;
pub mod vehicle_controller;
