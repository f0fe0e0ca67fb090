//! Candidatos de importación
//!
//! Lo que devuelve el extractor de documentos no es confiable: cada objeto
//! se deserializa a un candidato parcial (cualquier campo puede faltar o
//! venir en `null`) y luego se convierte al request de creación, que pasa
//! por la misma validación que el formulario manual.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{
    Attachment, CreateDriverRequest, CreateFineRequest, CreateInfractionCodeRequest,
    CreateVehicleRequest, DriverRef, PaymentStatus,
};

fn text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

// Candidato de motorista (documento de CNH)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverCandidate {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub cnh_number: Option<String>,
    pub validity_date: Option<String>,
}

impl From<DriverCandidate> for CreateDriverRequest {
    fn from(candidate: DriverCandidate) -> Self {
        Self {
            name: text(candidate.name),
            cpf: text(candidate.cpf),
            license_number: text(candidate.cnh_number),
            validity_date: text(candidate.validity_date),
        }
    }
}

// Candidato de vehículo (documento CRLV)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleCandidate {
    pub plate: Option<String>,
    pub renavam: Option<String>,
    pub chassis: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

impl VehicleCandidate {
    /// Sin año en el documento se usa `default_year`
    pub fn into_request(self, default_year: i32) -> CreateVehicleRequest {
        CreateVehicleRequest {
            plate: text(self.plate),
            renavam: text(self.renavam),
            chassis: text(self.chassis),
            brand: text(self.brand),
            model: text(self.model),
            year: self.year.unwrap_or(default_year),
        }
    }
}

// Candidato de multa (notificación de autuación o planilla)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FineCandidate {
    pub driver_name: Option<String>,
    pub plate: Option<String>,
    pub auto_infraction: Option<String>,
    pub date: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub value: Option<Decimal>,
    pub organ: Option<String>,
    pub indicates_driver: Option<bool>,
    pub location: Option<String>,
    pub points: Option<u32>,
    pub observations: Option<String>,
}

impl FineCandidate {
    /// Las multas importadas entran sin "pagar dobrado" y pendientes
    pub fn into_request(self, attachment: Option<Attachment>) -> CreateFineRequest {
        let driver = self
            .driver_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .map(DriverRef::Name);

        CreateFineRequest {
            ticket_number: text(self.auto_infraction),
            plate: text(self.plate),
            code: text(self.code),
            date: text(self.date),
            driver,
            description: self.description,
            value: self.value,
            points: self.points,
            issuing_authority: text(self.organ),
            location: text(self.location),
            indicates_driver: self.indicates_driver.unwrap_or(false),
            pay_double: false,
            payment_status: PaymentStatus::Pending,
            observations: text(self.observations),
            attachment,
        }
    }
}

// Candidato de código de infracción (tabla del Detran)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfractionCodeCandidate {
    pub code: Option<String>,
    pub description: Option<String>,
    pub default_value: Option<Decimal>,
    pub default_points: Option<u32>,
}

impl From<InfractionCodeCandidate> for CreateInfractionCodeRequest {
    fn from(candidate: InfractionCodeCandidate) -> Self {
        Self {
            code: text(candidate.code),
            description: text(candidate.description),
            default_value: candidate.default_value.unwrap_or(Decimal::ZERO),
            default_points: candidate.default_points.unwrap_or(0),
        }
    }
}
