//! Cliente HTTP para el record store
//!
//! El record store es el backend REST que persiste vehicles, tasks y
//! registros de combustible. Este módulo define el trait `RecordStore` que
//! consume el resto del servicio y su implementación sobre reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::fuel::{FuelRecord, FuelStation};
use crate::models::task::{NewTask, Task, TaskUpdate};
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleUpdate};
use crate::utils::errors::{AppError, AppResult};

/// Operaciones del record store que usa el dashboard
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;
    async fn list_tasks(&self) -> AppResult<Vec<Task>>;
    async fn list_fuel_records(&self) -> AppResult<Vec<FuelRecord>>;
    async fn list_fuel_stations(&self) -> AppResult<Vec<FuelStation>>;

    async fn create_vehicle(&self, vehicle: &NewVehicle) -> AppResult<()>;
    async fn update_vehicle(&self, id: i32, update: &VehicleUpdate) -> AppResult<()>;

    async fn create_task(&self, task: &NewTask) -> AppResult<()>;
    async fn update_task(&self, id: i32, update: &TaskUpdate) -> AppResult<()>;
    async fn delete_task(&self, id: i32) -> AppResult<()>;

    async fn delete_fuel_record(&self, id: i32) -> AppResult<()>;
}

/// Implementación HTTP (JSON) del record store
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
}

impl HttpRecordStore {
    /// Crear nuevo cliente HTTP con URL base configurable
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        debug!("📥 GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response, &url).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Invalid JSON from {}: {}", url, e)))
    }
}

/// Traducir el status HTTP a `AppError`; 404 se conserva como NotFound
async fn check_status(response: Response, url: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("❌ Record store respondió {} para {}: {}", status, url, body);

    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(format!("{} not found in record store", url)));
    }
    Err(AppError::ExternalApi(format!("HTTP {} from {}", status, url)))
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.get_json("/api/vehicles").await
    }

    async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        self.get_json("/api/tasks").await
    }

    async fn list_fuel_records(&self) -> AppResult<Vec<FuelRecord>> {
        self.get_json("/api/fuel-records").await
    }

    async fn list_fuel_stations(&self) -> AppResult<Vec<FuelStation>> {
        self.get_json("/api/fuel-stations").await
    }

    async fn create_vehicle(&self, vehicle: &NewVehicle) -> AppResult<()> {
        let url = self.url("/api/vehicles");
        debug!("📤 POST {}", url);
        let response = self.client.post(&url).json(vehicle).send().await?;
        check_status(response, &url).await?;
        Ok(())
    }

    async fn update_vehicle(&self, id: i32, update: &VehicleUpdate) -> AppResult<()> {
        let url = self.url(&format!("/api/vehicles/{}", id));
        debug!("📤 PUT {}", url);
        let response = self.client.put(&url).json(update).send().await?;
        check_status(response, &url).await?;
        Ok(())
    }

    async fn create_task(&self, task: &NewTask) -> AppResult<()> {
        let url = self.url("/api/tasks");
        debug!("📤 POST {}", url);
        let response = self.client.post(&url).json(task).send().await?;
        check_status(response, &url).await?;
        Ok(())
    }

    async fn update_task(&self, id: i32, update: &TaskUpdate) -> AppResult<()> {
        let url = self.url(&format!("/api/tasks/{}", id));
        debug!("📤 PUT {}", url);
        let response = self.client.put(&url).json(update).send().await?;
        check_status(response, &url).await?;
        Ok(())
    }

    async fn delete_task(&self, id: i32) -> AppResult<()> {
        let url = self.url(&format!("/api/tasks/{}", id));
        debug!("🗑️ DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check_status(response, &url).await?;
        Ok(())
    }

    async fn delete_fuel_record(&self, id: i32) -> AppResult<()> {
        let url = self.url(&format!("/api/fuel-records/{}", id));
        debug!("🗑️ DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check_status(response, &url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let store = HttpRecordStore::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(store.base_url(), "http://localhost:5000");
        assert_eq!(store.url("/api/tasks/4"), "http://localhost:5000/api/tasks/4");
    }
}
