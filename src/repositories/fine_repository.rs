use uuid::Uuid;

use crate::database::RecordStore;
use crate::models::Fine;
use crate::utils::errors::AppResult;

/// Acceso a la colección de multas
#[derive(Clone)]
pub struct FineRepository {
    store: RecordStore,
}

impl FineRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn create(&self, fine: Fine) -> AppResult<Fine> {
        self.store.insert(fine)
    }

    pub fn list(&self) -> AppResult<Vec<Fine>> {
        self.store.list()
    }

    pub fn find_by_id(&self, id: Uuid) -> AppResult<Option<Fine>> {
        Ok(self.list()?.into_iter().find(|f| f.id == id))
    }

    /// Multas cuyo nombre de motorista coincide exactamente
    pub fn find_by_driver_name(&self, driver_name: &str) -> AppResult<Vec<Fine>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|f| f.driver_name.as_deref() == Some(driver_name))
            .collect())
    }

    pub fn update(&self, fine: Fine) -> AppResult<bool> {
        self.store.update(fine)
    }
}
