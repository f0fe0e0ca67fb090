//! Configuración de variables de entorno
//!
//! Este módulo lee la configuración del entorno (después de cargar `.env`
//! con dotenvy). Todas las variables tienen un valor por defecto; un valor
//! inválido es un `AppError::Config`, nunca un panic.

use std::env;
use std::path::PathBuf;

use crate::config::storage::{StorageConfig, StoreBackendKind};
use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Configuración de la aplicación
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub storage: StorageConfig,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub log_level: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl AppConfig {
    /// Carga la configuración desde el entorno
    pub fn from_env() -> AppResult<Self> {
        let backend: StoreBackendKind = var_or("FLEET_STORE_BACKEND", "file")
            .parse()
            .map_err(AppError::Config)?;

        Ok(Self {
            environment: var_or("FLEET_ENVIRONMENT", "development"),
            storage: StorageConfig {
                backend,
                data_dir: PathBuf::from(var_or("FLEET_DATA_DIR", "./data")),
                redis_url: var_or("REDIS_URL", "redis://localhost:6379"),
            },
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            gemini_model: var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            log_level: var_or("FLEET_LOG_LEVEL", "info"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_or_falls_back_on_blank() {
        assert_eq!(var_or("FLEET_TEST_VARIABLE_THAT_IS_NEVER_SET", "x"), "x");
    }
}
