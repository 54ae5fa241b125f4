use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rentxotic_fleet::cache::FleetCache;
use rentxotic_fleet::clients::HttpRecordStore;
use rentxotic_fleet::config::environment::EnvironmentConfig;
use rentxotic_fleet::routes::create_app;
use rentxotic_fleet::services::{DisplayClock, FleetService};
use rentxotic_fleet::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (RUST_LOG, por defecto info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏎️ RentXotic - Fleet Dashboard Service");
    info!("================================================");

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;
    info!("⚙️ Entorno: {}", config.environment);
    info!("🗄️ Record store: {}", config.record_store_url);

    let store = match HttpRecordStore::new(config.record_store_url.clone(), config.record_store_timeout) {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error creando el cliente del record store: {}", e);
            return Err(anyhow::anyhow!("Error de cliente HTTP: {}", e));
        }
    };

    let cache = Arc::new(FleetCache::new(config.cache_ttl));
    let fleet = FleetService::new(Arc::new(store), cache, config.rules.clone());
    let clock = DisplayClock::start(config.clock_tick);

    let state = AppState::new(config.clone(), fleet, clock);
    let clock = state.clock.clone();
    let app = create_app(state);

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard - Resumen completo");
    info!("   GET  /api/dashboard/stats - Estadísticas de flota");
    info!("   GET  /api/dashboard/alerts - Alertas activas");
    info!("   POST /api/dashboard/refresh - Invalidar cache");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles?search=&status= - Listar/filtrar vehículos");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   POST /api/vehicles/:id/rotate-status - Rotar estado");
    info!("   POST /api/vehicles/:id/ready - Marcar listo");
    info!("   POST /api/vehicles/:id/washed - Marcar lavado");
    info!("   POST /api/vehicles/:id/fuel-task - Crear task de repostaje");
    info!("   POST /api/vehicles/ready-all - Mark All Ready");
    info!("   POST /api/vehicles/refresh-fuel - Update All");
    info!("📋 Tasks:");
    info!("   GET  /api/tasks - Listar tasks");
    info!("   POST /api/tasks - Crear task");
    info!("   PUT  /api/tasks/:id - Actualizar task");
    info!("   POST /api/tasks/:id/complete - Completar task");
    info!("   DELETE /api/tasks/:id - Eliminar task");
    info!("   GET  /api/tasks/export - Exportar CSV");
    info!("⛽ Combustible:");
    info!("   GET  /api/fuel-records - Registros y estadísticas");
    info!("   DELETE /api/fuel-records/:id - Eliminar registro");
    info!("   GET  /api/fuel-records/report - Informe de combustible");
    info!("   GET  /api/fuel-stations - Estaciones");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    clock.stop();
    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
