//! Configuración del almacenamiento
//!
//! Elige y abre el backend clave-valor del record store.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::database::{FileBackend, KeyValueBackend, MemoryBackend, RedisBackend};
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackendKind {
    File,
    Memory,
    Redis,
}

impl fmt::Display for StoreBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreBackendKind::File => "file",
            StoreBackendKind::Memory => "memory",
            StoreBackendKind::Redis => "redis",
        };
        f.write_str(name)
    }
}

impl FromStr for StoreBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreBackendKind::File),
            "memory" => Ok(StoreBackendKind::Memory),
            "redis" => Ok(StoreBackendKind::Redis),
            other => Err(format!(
                "FLEET_STORE_BACKEND must be file, memory or redis (got '{}')",
                other
            )),
        }
    }
}

/// Configuración del record store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StoreBackendKind,
    pub data_dir: PathBuf,
    pub redis_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackendKind::File,
            data_dir: PathBuf::from("./data"),
            redis_url: "redis://localhost:6379".to_string(),
        }
    }
}

impl StorageConfig {
    /// Abre el backend configurado
    pub fn open_backend(&self) -> AppResult<Arc<dyn KeyValueBackend>> {
        let backend: Arc<dyn KeyValueBackend> = match self.backend {
            StoreBackendKind::File => Arc::new(FileBackend::new(self.data_dir.clone())),
            StoreBackendKind::Memory => Arc::new(MemoryBackend::new()),
            StoreBackendKind::Redis => Arc::new(RedisBackend::connect(&self.redis_url)?),
        };
        info!("🗄️ Record store sobre backend {}", backend.name());
        Ok(backend)
    }
}
