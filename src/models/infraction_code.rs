//! Modelo de InfractionCode
//!
//! Catálogo de códigos de infracción del Detran. Solo se crea por
//! importación y no se modifica después: es una tabla de consulta.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::database::record_store::Record;

/// InfractionCode - colección `fg_detran`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfractionCode {
    pub id: Uuid,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub default_value: Decimal,
    pub default_points: u32,
}

impl Record for InfractionCode {
    const COLLECTION: &'static str = "fg_detran";
    const ENTITY: &'static str = "Infraction code";
    const KEY_FIELD: &'static str = "code";

    fn id(&self) -> Uuid {
        self.id
    }

    fn natural_key(&self) -> &str {
        &self.code
    }
}

/// Request para crear un código de infracción
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInfractionCodeRequest {
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub code: String,

    pub description: String,

    #[validate(custom = "crate::utils::validation::validate_money")]
    pub default_value: Decimal,

    pub default_points: u32,
}

impl From<CreateInfractionCodeRequest> for InfractionCode {
    fn from(request: CreateInfractionCodeRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: request.code,
            description: request.description,
            default_value: request.default_value,
            default_points: request.default_points,
        }
    }
}
