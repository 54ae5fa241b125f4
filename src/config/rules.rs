//! Reglas de negocio configurables de la flota
//!
//! Las variantes del dashboard no coinciden en qué hace "mark ready" ni en
//! qué issues se limpian al lavar un vehículo. Ninguna se considera canónica:
//! el conjunto de reglas se elige por preset o se carga desde un JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::vehicle::VehicleCondition;
use crate::utils::errors::{AppError, AppResult};

/// Qué issues se eliminan de `Vehicle.issues`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", content = "issues", rename_all = "lowercase")]
pub enum IssueClearing {
    /// Vaciar la lista completa
    All,
    /// Eliminar solo estos strings exactos
    Only(Vec<String>),
    /// No tocar la lista
    Keep,
}

impl IssueClearing {
    /// Aplicar la regla a una lista de issues, preservando el orden
    pub fn apply(&self, issues: &[String]) -> Vec<String> {
        match self {
            IssueClearing::All => Vec::new(),
            IssueClearing::Only(targets) => issues
                .iter()
                .filter(|issue| !targets.contains(issue))
                .cloned()
                .collect(),
            IssueClearing::Keep => issues.to_vec(),
        }
    }
}

/// Cómo se generan las alertas de lavado
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WashAlertMode {
    /// Una sola alerta con el total de vehículos sin lavar
    #[default]
    Aggregate,
    /// Una alerta por vehículo sin lavar
    PerVehicle,
}

/// Regla de "mark ready" (individual y masivo)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadyRule {
    /// Nivel mínimo de combustible tras marcar un vehículo como listo
    pub min_fuel_level: i32,
    /// Nivel mínimo usado por "Mark All Ready"
    pub bulk_min_fuel_level: i32,
    pub condition: VehicleCondition,
    pub clear_issues: IssueClearing,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WashRule {
    pub clear_issues: IssueClearing,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FleetRules {
    pub ready: ReadyRule,
    pub wash: WashRule,
    #[serde(default)]
    pub wash_alert_mode: WashAlertMode,
}

impl FleetRules {
    /// Preset "classic": mark ready vacía todos los issues
    pub fn classic() -> Self {
        Self {
            ready: ReadyRule {
                min_fuel_level: 80,
                bulk_min_fuel_level: 85,
                condition: VehicleCondition::Excellent,
                clear_issues: IssueClearing::All,
            },
            wash: WashRule {
                clear_issues: IssueClearing::Only(vec!["Needs Wash".to_string()]),
            },
            wash_alert_mode: WashAlertMode::Aggregate,
        }
    }

    /// Preset "service": mark ready solo limpia los issues de servicio
    pub fn service() -> Self {
        Self {
            ready: ReadyRule {
                min_fuel_level: 80,
                bulk_min_fuel_level: 85,
                condition: VehicleCondition::Excellent,
                clear_issues: IssueClearing::Only(vec![
                    "Service Due".to_string(),
                    "Minor Cosmetic".to_string(),
                    "Low Fuel".to_string(),
                ]),
            },
            wash: WashRule {
                clear_issues: IssueClearing::Only(vec!["Needs Wash".to_string()]),
            },
            wash_alert_mode: WashAlertMode::PerVehicle,
        }
    }

    pub fn from_preset(name: &str) -> AppResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::classic()),
            "service" => Ok(Self::service()),
            other => Err(AppError::Config(format!("Unknown fleet rules preset '{}'", other))),
        }
    }

    /// Cargar reglas desde un fichero JSON
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let rules: FleetRules = serde_json::from_str(raw)
            .map_err(|e| AppError::Config(format!("Invalid fleet rules: {}", e)))?;
        rules.check()?;
        Ok(rules)
    }

    fn check(&self) -> AppResult<()> {
        for level in [self.ready.min_fuel_level, self.ready.bulk_min_fuel_level] {
            if !(0..=100).contains(&level) {
                return Err(AppError::Config(format!(
                    "Ready fuel level {} outside 0..=100",
                    level
                )));
            }
        }
        Ok(())
    }
}

impl Default for FleetRules {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_issue_clearing_only_keeps_order() {
        let rule = FleetRules::service().ready.clear_issues;
        let remaining = rule.apply(&issues(&["Needs Wash", "Service Due", "Scratch", "Low Fuel"]));
        assert_eq!(remaining, issues(&["Needs Wash", "Scratch"]));
    }

    #[test]
    fn test_issue_clearing_all_and_keep() {
        let current = issues(&["Needs Wash", "Scratch"]);
        assert!(IssueClearing::All.apply(&current).is_empty());
        assert_eq!(IssueClearing::Keep.apply(&current), current);
    }

    #[test]
    fn test_rules_from_json() {
        let rules = FleetRules::from_json(
            r#"{
                "ready": {
                    "minFuelLevel": 90,
                    "bulkMinFuelLevel": 90,
                    "condition": "good",
                    "clearIssues": { "mode": "only", "issues": ["Service Due"] }
                },
                "wash": { "clearIssues": { "mode": "all" } },
                "washAlertMode": "per-vehicle"
            }"#,
        )
        .unwrap();

        assert_eq!(rules.ready.min_fuel_level, 90);
        assert_eq!(rules.ready.condition, VehicleCondition::Good);
        assert_eq!(rules.wash.clear_issues, IssueClearing::All);
        assert_eq!(rules.wash_alert_mode, WashAlertMode::PerVehicle);
    }

    #[test]
    fn test_rules_reject_invalid_fuel_floor() {
        let result = FleetRules::from_json(
            r#"{
                "ready": {
                    "minFuelLevel": 120,
                    "bulkMinFuelLevel": 85,
                    "condition": "excellent",
                    "clearIssues": { "mode": "all" }
                },
                "wash": { "clearIssues": { "mode": "keep" } }
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_preset() {
        assert!(FleetRules::from_preset("classic").is_ok());
        assert!(FleetRules::from_preset("deluxe").is_err());
    }
}
