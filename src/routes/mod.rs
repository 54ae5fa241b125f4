//! Rutas HTTP
//!
//! Cada módulo expone un `create_*_router()` que se anida bajo `/api`.
//! `create_app` monta el router completo con CORS, tracing y health check.

pub mod dashboard_routes;
pub mod fuel_routes;
pub mod task_routes;
pub mod vehicle_routes;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use http::header;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dto::api_dto::ApiResponse;
use crate::dto::fleet_dto::HealthResponse;
use crate::middleware::cors::cors_middleware;
use crate::services::report_service::{ExportFile, ReportError};
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config);

    Router::new()
        .route("/health", get(health))
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/tasks", task_routes::create_task_router())
        .merge(fuel_routes::create_fuel_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "rentxotic_fleet",
        record_store: state.config.record_store_url.clone(),
        current_time: state.clock.now().to_rfc3339(),
        clock_running: state.clock.is_running(),
        cache: state.fleet.cache_stats().await,
    })
}

/// Respuesta de descarga; una exportación vacía devuelve un aviso JSON
pub(crate) fn download_response(export: Result<ExportFile, ReportError>) -> Response {
    match export {
        Ok(file) => {
            info!("📄 Descarga generada: {}", file.file_name);
            let disposition = format!("attachment; filename=\"{}\"", file.file_name);
            (
                [
                    (header::CONTENT_TYPE, file.content_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                file.content,
            )
                .into_response()
        }
        Err(notice) => Json(ApiResponse::notice(notice.to_string())).into_response(),
    }
}
