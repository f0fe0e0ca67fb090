//! Servicio de motoristas
//!
//! Alta (formulario o importación) y edición en su lugar. El CPF se compara
//! literalmente; no hay borrado.

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateDriverRequest, Driver};
use crate::repositories::DriverRepository;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::validate_not_empty;

#[derive(Clone)]
pub struct DriverService {
    drivers: DriverRepository,
}

impl DriverService {
    pub fn new(drivers: DriverRepository) -> Self {
        Self { drivers }
    }

    pub fn register_driver(&self, request: CreateDriverRequest) -> AppResult<Driver> {
        request.validate()?;
        let driver = self.drivers.create(request.into_driver()?)?;
        info!("🪪 Motorista {} registrado", driver.name);
        Ok(driver)
    }

    /// Reemplaza el motorista con el mismo id; `false` si no existe
    pub fn update_driver(&self, driver: Driver) -> AppResult<bool> {
        if validate_not_empty(&driver.name).is_err() {
            return Err(validation_error("name", "required"));
        }
        if validate_not_empty(&driver.cpf).is_err() {
            return Err(validation_error("cpf", "required"));
        }
        self.drivers.update(driver)
    }

    pub fn list_drivers(&self) -> AppResult<Vec<Driver>> {
        self.drivers.list()
    }

    pub fn find_driver(&self, id: Uuid) -> AppResult<Option<Driver>> {
        self.drivers.find_by_id(id)
    }
}
