//! Backends clave-valor del record store
//!
//! Cada colección se guarda como un único valor de texto (JSON) bajo su
//! clave. El backend no conoce los tipos: solo lee, reemplaza y borra.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::utils::errors::{storage_error, AppResult};

/// Operaciones de almacenamiento clave-valor
pub trait KeyValueBackend: Send + Sync {
    /// Valor completo guardado bajo la clave, `None` si nunca se escribió
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Reemplaza el valor completo de la clave
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Borra la clave. Borrar una clave inexistente no es un error.
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Nombre corto del backend para logs
    fn name(&self) -> &'static str;
}

/// Backend en memoria del proceso (tests y ejecuciones en seco)
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| storage_error("memory backend lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| storage_error("memory backend lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| storage_error("memory backend lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Backend en disco: un documento JSON por clave dentro de un directorio
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Crea el backend; el directorio se crea en la primera escritura
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        debug!("📥 Leída clave {} desde {}", key, path.display());
        Ok(Some(raw))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // escribir a un temporal y renombrar: nunca queda un snapshot a medias
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!("💾 Guardada clave {} en {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
            debug!("🗑️ Eliminada clave {}", key);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("fleet_compliance_backend_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_backend_set_get_remove() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("fg_drivers").unwrap(), None);

        backend.set("fg_drivers", "[]").unwrap();
        assert_eq!(backend.get("fg_drivers").unwrap().as_deref(), Some("[]"));

        backend.remove("fg_drivers").unwrap();
        assert_eq!(backend.get("fg_drivers").unwrap(), None);
    }

    #[test]
    fn test_file_backend_replaces_whole_value() {
        let dir = scratch_dir();
        let backend = FileBackend::new(&dir);
        assert_eq!(backend.get("fg_fines").unwrap(), None);

        backend.set("fg_fines", "[1]").unwrap();
        backend.set("fg_fines", "[1,2]").unwrap();
        assert_eq!(backend.get("fg_fines").unwrap().as_deref(), Some("[1,2]"));
        assert!(!dir.join("fg_fines.json.tmp").exists());

        backend.remove("fg_fines").unwrap();
        backend.remove("fg_fines").unwrap();
        assert_eq!(backend.get("fg_fines").unwrap(), None);

        let _ = fs::remove_dir_all(&dir);
    }
}
