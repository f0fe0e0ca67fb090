//! Modelo de Driver
//!
//! Motoristas de la flota. El CPF es la clave natural; la validez de la CNH
//! es opcional (vacía significa "no informada").

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::database::record_store::Record;
use crate::utils::dates::{optional_date, parse_optional_date};
use crate::utils::errors::AppResult;

/// Driver - colección `fg_drivers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    #[serde(rename = "cnhNumber", default)]
    pub license_number: String,
    #[serde(default, with = "optional_date")]
    pub validity_date: Option<NaiveDate>,
}

impl Record for Driver {
    const COLLECTION: &'static str = "fg_drivers";
    const ENTITY: &'static str = "Driver";
    const KEY_FIELD: &'static str = "CPF";

    fn id(&self) -> Uuid {
        self.id
    }

    fn natural_key(&self) -> &str {
        &self.cpf
    }
}

/// Request para crear un nuevo motorista (formulario o importación)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub name: String,

    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub cpf: String,

    pub license_number: String,

    #[validate(custom = "crate::utils::validation::validate_optional_date")]
    pub validity_date: String,
}

impl CreateDriverRequest {
    /// Convierte el request (ya validado) en un Driver con id nuevo
    pub fn into_driver(self) -> AppResult<Driver> {
        let validity_date = parse_optional_date("validity_date", &self.validity_date)?;
        Ok(Driver {
            id: Uuid::new_v4(),
            name: self.name,
            cpf: self.cpf,
            license_number: self.license_number,
            validity_date,
        })
    }
}
