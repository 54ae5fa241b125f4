//! Services module
//!
//! Este módulo contiene la lógica de negocio del dashboard. Los cálculos
//! (stats, alertas, rotación, reportes) son funciones puras sobre un
//! snapshot; `FleetService` los orquesta contra el cache y el record store.

pub mod alert_service;
pub mod clock_service;
pub mod fleet_service;
pub mod fleet_stats_service;
pub mod report_service;
pub mod status_rotator;

pub use clock_service::DisplayClock;
pub use fleet_service::FleetService;
