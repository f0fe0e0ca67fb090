//! Fechas de calendario
//!
//! Conversión entre el texto de formularios/documentos y `NaiveDate`, y el
//! formato serde de las fechas opcionales: se persisten como `"YYYY-MM-DD"`
//! y una fecha desconocida se persiste como cadena vacía.

use chrono::NaiveDate;

use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_date;

/// Convierte texto libre en fecha opcional. Vacío significa "no informada".
pub fn parse_optional_date(field: &'static str, value: &str) -> AppResult<Option<NaiveDate>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    validate_date(value).map(Some).map_err(|error| {
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, error);
        AppError::Validation(errors)
    })
}

/// Formato de exhibición dd/mm/aaaa
pub fn format_br_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// Serde para `Option<NaiveDate>` persistido como texto (vacío = `None`)
pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date("validity_date", "").unwrap(), None);
        assert_eq!(
            parse_optional_date("validity_date", "2024-01-31").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert!(parse_optional_date("validity_date", "31-01-2024").is_err());
    }

    #[test]
    fn test_format_br_date() {
        assert_eq!(format_br_date(NaiveDate::from_ymd_opt(2024, 1, 31)), "31/01/2024");
        assert_eq!(format_br_date(None), "");
    }
}
