//! Record store
//!
//! Almacenamiento por colección sobre un `KeyValueBackend`. Cada colección
//! se lee entera (`list`) y cada escritura exitosa reemplaza el snapshot
//! completo. No hay diffs ni suscripciones: quien escribe vuelve a leer.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::backend::{KeyValueBackend, MemoryBackend};
use super::uniqueness::ensure_unique;
use crate::utils::errors::AppResult;

/// Registro persistible en una colección con clave natural única
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Clave de la colección en el backend
    const COLLECTION: &'static str;
    /// Nombre de la entidad para mensajes
    const ENTITY: &'static str;
    /// Nombre de la clave natural para mensajes
    const KEY_FIELD: &'static str;

    fn id(&self) -> Uuid;

    fn natural_key(&self) -> &str;
}

#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Store en memoria, vacío
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Colección completa en orden de inserción; vacía si nunca se escribió
    pub fn list<T: Record>(&self) -> AppResult<Vec<T>> {
        match self.backend.get(T::COLLECTION)? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => Ok(serde_json::from_str(&raw)?),
        }
    }

    /// Inserta al final si la clave natural no existe
    pub fn insert<T: Record>(&self, item: T) -> AppResult<T> {
        let mut items = self.list::<T>()?;
        if let Err(e) = ensure_unique(&item, &items) {
            info!("⛔ {} rechazado: {}", T::ENTITY, e);
            return Err(e);
        }

        items.push(item.clone());
        self.persist(&items)?;
        debug!("➕ {} {} insertado ({} registros)", T::ENTITY, item.id(), items.len());
        Ok(item)
    }

    /// Reemplaza en su lugar el registro con el mismo id.
    ///
    /// Un id inexistente no crea nada: se registra en el log y devuelve
    /// `false`.
    pub fn update<T: Record>(&self, item: T) -> AppResult<bool> {
        let mut items = self.list::<T>()?;
        let Some(index) = items.iter().position(|existing| existing.id() == item.id()) else {
            warn!("🔍 {} {} no encontrado, actualización ignorada", T::ENTITY, item.id());
            return Ok(false);
        };

        items[index] = item;
        self.persist(&items)?;
        Ok(true)
    }

    fn persist<T: Record>(&self, items: &[T]) -> AppResult<()> {
        let serialized = serde_json::to_string(items)?;
        self.backend.set(T::COLLECTION, &serialized)
    }

    /// Lee un valor de slot único (por ejemplo la sesión actual)
    pub fn read_slot<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.backend.get(key)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        }
    }

    /// Sobrescribe un slot único
    pub fn write_slot<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let serialized = serde_json::to_string(value)?;
        self.backend.set(key, &serialized)
    }

    pub fn clear_slot(&self, key: &str) -> AppResult<()> {
        self.backend.remove(key)
    }
}
