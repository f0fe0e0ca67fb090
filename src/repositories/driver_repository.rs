use uuid::Uuid;

use crate::database::RecordStore;
use crate::models::Driver;
use crate::utils::errors::AppResult;

/// Acceso a la colección de motoristas
#[derive(Clone)]
pub struct DriverRepository {
    store: RecordStore,
}

impl DriverRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn create(&self, driver: Driver) -> AppResult<Driver> {
        self.store.insert(driver)
    }

    pub fn list(&self) -> AppResult<Vec<Driver>> {
        self.store.list()
    }

    pub fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        Ok(self.list()?.into_iter().find(|d| d.id == id))
    }

    pub fn update(&self, driver: Driver) -> AppResult<bool> {
        self.store.update(driver)
    }
}
