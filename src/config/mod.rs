//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y la configuración del
//! almacenamiento.

pub mod environment;
pub mod storage;

pub use environment::AppConfig;
pub use storage::{StorageConfig, StoreBackendKind};
