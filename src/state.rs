//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::clock_service::DisplayClock;
use crate::services::fleet_service::FleetService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub fleet: Arc<FleetService>,
    pub clock: Arc<DisplayClock>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, fleet: FleetService, clock: DisplayClock) -> Self {
        Self {
            config,
            fleet: Arc::new(fleet),
            clock: Arc::new(clock),
        }
    }
}
