//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto razonable para desarrollo.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::config::rules::FleetRules;
use crate::utils::errors::AppResult;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    /// URL base del record store (`/api/vehicles`, `/api/tasks`...)
    pub record_store_url: String,
    pub record_store_timeout: Duration,
    /// TTL de las colecciones cacheadas
    pub cache_ttl: Duration,
    /// Periodo del reloj del dashboard
    pub clock_tick: Duration,
    pub rules: FleetRules,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            record_store_url: "http://localhost:5000".to_string(),
            record_store_timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(300),
            clock_tick: Duration::from_secs(1),
            rules: FleetRules::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Construir la configuración desde variables de entorno
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let rules = match env::var("FLEET_RULES_PATH") {
            Ok(path) if !path.trim().is_empty() => FleetRules::from_file(path.trim())?,
            _ => match env::var("FLEET_RULES_PRESET") {
                Ok(preset) => FleetRules::from_preset(&preset)?,
                Err(_) => defaults.rules,
            },
        };

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or("PORT", defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            record_store_url: env::var("RECORD_STORE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.record_store_url),
            record_store_timeout: Duration::from_secs(parse_or(
                "RECORD_STORE_TIMEOUT_SECS",
                defaults.record_store_timeout.as_secs(),
            )),
            cache_ttl: Duration::from_secs(parse_or("CACHE_TTL_SECONDS", defaults.cache_ttl.as_secs())),
            clock_tick: Duration::from_millis(
                parse_or("CLOCK_TICK_MS", defaults.clock_tick.as_millis() as u64).max(10),
            ),
            rules,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Leer una variable numérica; si no parsea, avisar y usar el default
fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("⚠️ {}='{}' no es válido, usando {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert_eq!(config.clock_tick, Duration::from_secs(1));
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        env::set_var("RENTXOTIC_TEST_PARSE_OR", "not-a-number");
        assert_eq!(parse_or("RENTXOTIC_TEST_PARSE_OR", 42u64), 42);
        env::set_var("RENTXOTIC_TEST_PARSE_OR", " 7 ");
        assert_eq!(parse_or("RENTXOTIC_TEST_PARSE_OR", 42u64), 7);
        env::remove_var("RENTXOTIC_TEST_PARSE_OR");
    }
}
