//! Servicio de vehículos

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateVehicleRequest, Vehicle};
use crate::repositories::VehicleRepository;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{validate_not_empty, validate_vehicle_year};

#[derive(Clone)]
pub struct VehicleService {
    vehicles: VehicleRepository,
}

impl VehicleService {
    pub fn new(vehicles: VehicleRepository) -> Self {
        Self { vehicles }
    }

    pub fn register_vehicle(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;
        let vehicle = self.vehicles.create(Vehicle::from(request))?;
        info!("🚗 Vehículo {} registrado", vehicle.plate);
        Ok(vehicle)
    }

    pub fn update_vehicle(&self, vehicle: Vehicle) -> AppResult<bool> {
        if validate_not_empty(&vehicle.plate).is_err() {
            return Err(validation_error("plate", "required"));
        }
        if validate_not_empty(&vehicle.renavam).is_err() {
            return Err(validation_error("renavam", "required"));
        }
        if validate_vehicle_year(vehicle.year).is_err() {
            return Err(validation_error("year", "out of range"));
        }
        self.vehicles.update(vehicle)
    }

    pub fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.vehicles.list()
    }

    pub fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        self.vehicles.find_by_id(id)
    }
}
