//! Cache
//!
//! Este módulo contiene el cache en memoria de las colecciones del record store.

pub mod fleet_cache;

pub use fleet_cache::{CacheKey, CacheStats, FleetCache};
