//! Middleware del sistema
//!
//! Este módulo contiene la configuración de CORS para el dashboard.

pub mod cors;

pub use cors::*;
