use uuid::Uuid;

use crate::database::RecordStore;
use crate::models::Vehicle;
use crate::utils::errors::AppResult;

/// Acceso a la colección de vehículos
#[derive(Clone)]
pub struct VehicleRepository {
    store: RecordStore,
}

impl VehicleRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn create(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        self.store.insert(vehicle)
    }

    pub fn list(&self) -> AppResult<Vec<Vehicle>> {
        self.store.list()
    }

    pub fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.list()?.into_iter().find(|v| v.id == id))
    }

    pub fn update(&self, vehicle: Vehicle) -> AppResult<bool> {
        self.store.update(vehicle)
    }
}
