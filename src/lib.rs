//! RentXotic fleet service
//!
//! Backend del dashboard de flota: lee vehicles, tasks y registros de
//! combustible del record store, calcula estadísticas y alertas, y ejecuta
//! las acciones rápidas (rotar estado, marcar listo, lavado, repostaje).

pub mod cache;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
