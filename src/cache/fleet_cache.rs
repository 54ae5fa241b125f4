//! Cache de colecciones del dashboard
//!
//! Guarda la última versión conocida de cada colección del record store
//! (vehicles, tasks, fuel records, fuel stations). Una mutación correcta marca
//! la colección como stale y la siguiente lectura la vuelve a pedir.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::fuel::{FuelRecord, FuelStation};
use crate::models::task::Task;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

/// Claves del cache (una por endpoint de listado)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Vehicles,
    Tasks,
    FuelRecords,
    FuelStations,
}

impl CacheKey {
    pub const ALL: [CacheKey; 4] = [
        CacheKey::Vehicles,
        CacheKey::Tasks,
        CacheKey::FuelRecords,
        CacheKey::FuelStations,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            CacheKey::Vehicles => "/api/vehicles",
            CacheKey::Tasks => "/api/tasks",
            CacheKey::FuelRecords => "/api/fuel-records",
            CacheKey::FuelStations => "/api/fuel-stations",
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Colección en cache con metadatos
#[derive(Debug)]
struct CachedCollection<T> {
    items: Arc<Vec<T>>,
    fetched_at: Instant,
    stale: bool,
}

/// Hueco tipado para una colección
///
/// `generation` avanza con cada invalidación; un fetch que empezó antes de
/// una invalidación guarda su resultado como stale.
pub struct CacheSlot<T> {
    key: CacheKey,
    entry: RwLock<Option<CachedCollection<T>>>,
    generation: AtomicU64,
}

impl<T> CacheSlot<T> {
    fn new(key: CacheKey) -> Self {
        Self {
            key,
            entry: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn key(&self) -> CacheKey {
        self.key
    }

    async fn fresh(&self, ttl: Duration) -> Option<Arc<Vec<T>>> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|cached| !cached.stale && cached.fetched_at.elapsed() < ttl)
            .map(|cached| cached.items.clone())
    }

    async fn last_known(&self) -> Option<Arc<Vec<T>>> {
        self.entry.read().await.as_ref().map(|cached| cached.items.clone())
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Guardar el resultado de un fetch iniciado en la generación `started_at`
    async fn store(&self, items: Vec<T>, started_at: u64) -> Arc<Vec<T>> {
        let items = Arc::new(items);
        let mut entry = self.entry.write().await;
        let stale = self.generation() != started_at;
        if stale {
            debug!("⏳ Fetch de {} superado por una invalidación, queda stale", self.key);
        }
        *entry = Some(CachedCollection {
            items: items.clone(),
            fetched_at: Instant::now(),
            stale,
        });
        items
    }

    /// Marcar como stale; devuelve true si había algo que invalidar
    async fn mark_stale(&self) -> bool {
        let mut entry = self.entry.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        match entry.as_mut() {
            Some(cached) => {
                cached.stale = true;
                true
            }
            None => false,
        }
    }
}

/// Estadísticas del cache
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    /// Lecturas servidas con datos stale porque el record store falló
    pub stale_served: u64,
    pub fetch_errors: u64,
}

/// Cache de las colecciones del dashboard
pub struct FleetCache {
    ttl: Duration,
    vehicles: CacheSlot<Vehicle>,
    tasks: CacheSlot<Task>,
    fuel_records: CacheSlot<FuelRecord>,
    fuel_stations: CacheSlot<FuelStation>,
    stats: RwLock<CacheStats>,
}

impl FleetCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            vehicles: CacheSlot::new(CacheKey::Vehicles),
            tasks: CacheSlot::new(CacheKey::Tasks),
            fuel_records: CacheSlot::new(CacheKey::FuelRecords),
            fuel_stations: CacheSlot::new(CacheKey::FuelStations),
            stats: RwLock::new(CacheStats::default()),
        }
    }

    pub fn vehicles(&self) -> &CacheSlot<Vehicle> {
        &self.vehicles
    }

    pub fn tasks(&self) -> &CacheSlot<Task> {
        &self.tasks
    }

    pub fn fuel_records(&self) -> &CacheSlot<FuelRecord> {
        &self.fuel_records
    }

    pub fn fuel_stations(&self) -> &CacheSlot<FuelStation> {
        &self.fuel_stations
    }

    /// Leer una colección; si falta o está stale, ejecutar `fetch`
    ///
    /// Si el fetch falla y existe una versión anterior, se sirve esa versión
    /// (el dashboard muestra datos viejos hasta el próximo refresh).
    pub async fn load<T, F>(&self, slot: &CacheSlot<T>, fetch: F) -> AppResult<Arc<Vec<T>>>
    where
        F: Future<Output = AppResult<Vec<T>>>,
    {
        if let Some(items) = slot.fresh(self.ttl).await {
            self.stats.write().await.hits += 1;
            debug!("📥 Cache HIT para {}", slot.key());
            return Ok(items);
        }

        self.stats.write().await.misses += 1;
        debug!("❌ Cache MISS para {}", slot.key());

        let started_at = slot.generation();
        match fetch.await {
            Ok(items) => {
                debug!("💾 Cache SET para {} ({} registros)", slot.key(), items.len());
                Ok(slot.store(items, started_at).await)
            }
            Err(e) => {
                let mut stats = self.stats.write().await;
                stats.fetch_errors += 1;
                match slot.last_known().await {
                    Some(items) => {
                        stats.stale_served += 1;
                        warn!("⚠️ Sirviendo {} stale tras error: {}", slot.key(), e);
                        Ok(items)
                    }
                    None => Err(e),
                }
            }
        }
    }

    /// Invalidar una colección tras una mutación correcta
    pub async fn invalidate(&self, key: CacheKey) {
        let invalidated = match key {
            CacheKey::Vehicles => self.vehicles.mark_stale().await,
            CacheKey::Tasks => self.tasks.mark_stale().await,
            CacheKey::FuelRecords => self.fuel_records.mark_stale().await,
            CacheKey::FuelStations => self.fuel_stations.mark_stale().await,
        };
        if invalidated {
            self.stats.write().await.invalidations += 1;
            debug!("🧹 Cache invalidado: {}", key);
        }
    }

    pub async fn invalidate_all(&self) {
        for key in CacheKey::ALL {
            self.invalidate(key).await;
        }
        info!("🧹 Cache de flota invalidado completamente");
    }

    pub async fn get_stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }
}
