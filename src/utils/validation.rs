//! Utilidades de validación
//!
//! Helpers para validar payloads en el borde del sistema y para
//! deserializar los campos que el record store puede devolver como `null`.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::utils::errors::AppResult;

/// Deserializar `null` como `T::default()`
///
/// Los arrays del ORM (`issues`) llegan a veces como `null` en lugar de `[]`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Validar un payload antes de enviarlo al record store
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate()?;
    Ok(())
}

/// Limitar un nivel de combustible al rango [0, 100]
pub fn clamp_fuel_level(value: i32) -> i32 {
    value.clamp(0, 100)
}

/// Normalizar un término de búsqueda (trim + minúsculas); vacío → None
pub fn normalize_search(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_fuel_level() {
        assert_eq!(clamp_fuel_level(-5), 0);
        assert_eq!(clamp_fuel_level(55), 55);
        assert_eq!(clamp_fuel_level(130), 100);
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(Some("  Ferrari ")), Some("ferrari".to_string()));
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(None), None);
    }
}
