//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su request de creación.
//! La placa es la clave natural.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::database::record_store::Record;

/// Vehicle - colección `fg_vehicles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub renavam: String,
    #[serde(default)]
    pub chassis: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    pub year: i32,
}

impl Record for Vehicle {
    const COLLECTION: &'static str = "fg_vehicles";
    const ENTITY: &'static str = "Vehicle";
    const KEY_FIELD: &'static str = "plate";

    fn id(&self) -> Uuid {
        self.id
    }

    fn natural_key(&self) -> &str {
        &self.plate
    }
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub plate: String,

    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub renavam: String,

    pub chassis: String,
    pub brand: String,
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
}

impl From<CreateVehicleRequest> for Vehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            plate: request.plate,
            renavam: request.renavam,
            chassis: request.chassis,
            brand: request.brand,
            model: request.model,
            year: request.year,
        }
    }
}

impl Vehicle {
    /// Descripción corta "MARCA MODELO"
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }
}
