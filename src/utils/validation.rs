//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos. Se usan tanto desde los `#[validate(custom = ...)]`
//! de los requests como directamente desde los servicios.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

/// Formatos de fecha aceptados: ISO (formulario) y brasileño (documentos)
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            let mut error = ValidationError::new("date");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            error
        })
}

/// Validar un campo de fecha opcional: vacío significa "desconocida"
pub fn validate_optional_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_date(value).map(|_| ())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar un valor monetario (no negativo)
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

/// Validar el año de fabricación de un vehículo
pub fn validate_vehicle_year(value: i32) -> Result<(), ValidationError> {
    validate_range(value, 1900, 2100)
}
