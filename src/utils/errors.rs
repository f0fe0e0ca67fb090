//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema y su
//! conversión a mensajes en línea para el usuario. Ningún error es fatal:
//! cada fallo deja el estado anterior intacto.

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Duplicate key: {entity} with {field} '{value}' already exists")]
    DuplicateKey {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Extraction failure: {0}")]
    ExtractionFailure(String),

    #[error("Authentication failed")]
    AuthFailure,

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

impl AppError {
    /// Código estable del error, útil para logs y salidas de la CLI
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateKey { .. } => "DUPLICATE_KEY",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ExtractionFailure(_) => "EXTRACTION_FAILURE",
            AppError::AuthFailure => "AUTH_FAILURE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Redis(_) => "REDIS_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::ExternalApi(_) => "EXTERNAL_API_ERROR",
        }
    }

    /// Mensaje en línea que se muestra al usuario.
    ///
    /// Las credenciales inválidas siempre producen el mismo mensaje, sin
    /// distinguir entre usuario desconocido y contraseña incorrecta.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DuplicateKey { entity, field, value } => {
                format!("{} with this {} already exists ({})", entity, field, value)
            }
            AppError::NotFound(msg) => msg.clone(),
            AppError::ExtractionFailure(_) => "Import via document extraction failed".to_string(),
            AppError::AuthFailure => "Invalid username or password".to_string(),
            AppError::Validation(e) => {
                let mut fields: Vec<&str> = e.field_errors().keys().copied().collect();
                fields.sort_unstable();
                format!("Fill in the required fields: {}", fields.join(", "))
            }
            AppError::Storage(_) | AppError::Serialization(_) | AppError::Redis(_) | AppError::Io(_) => {
                "An error occurred while accessing the record store".to_string()
            }
            AppError::Config(msg) => format!("Invalid configuration: {}", msg),
            AppError::ExternalApi(_) => {
                "An error occurred while communicating with external service".to_string()
            }
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, AppError::DuplicateKey { .. })
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de clave duplicada
pub fn conflict_error(entity: &'static str, field: &'static str, value: &str) -> AppError {
    AppError::DuplicateKey {
        entity,
        field,
        value: value.to_string(),
    }
}

/// Función helper para crear errores de extracción por archivo
pub fn extraction_error(file_name: &str, reason: impl std::fmt::Display) -> AppError {
    AppError::ExtractionFailure(format!("{}: {}", file_name, reason))
}

/// Función helper para errores internos del almacenamiento
pub fn storage_error(message: impl Into<String>) -> AppError {
    AppError::Storage(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_message_is_generic() {
        assert_eq!(AppError::AuthFailure.user_message(), "Invalid username or password");
        assert_eq!(AppError::AuthFailure.code(), "AUTH_FAILURE");
    }

    #[test]
    fn test_conflict_error_is_duplicate() {
        let error = conflict_error("Driver", "CPF", "123.456.789-00");
        assert!(error.is_duplicate());
        assert_eq!(
            error.user_message(),
            "Driver with this CPF already exists (123.456.789-00)"
        );
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let error = validation_error("cpf", "required");
        assert_eq!(error.user_message(), "Fill in the required fields: cpf");
    }
}
