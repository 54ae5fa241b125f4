//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y las reglas de negocio
//! configurables de la flota.

pub mod environment;
pub mod rules;

pub use environment::*;
pub use rules::{FleetRules, IssueClearing, ReadyRule, WashAlertMode, WashRule};
