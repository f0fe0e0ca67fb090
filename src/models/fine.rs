//! Modelo de Fine
//!
//! Multas de tránsito. El número de auto de infracción es la clave natural.
//! El par `driver_id`/`driver_name` es una referencia desnormalizada al
//! motorista: ambos lados se actualizan juntos con `assign_driver`.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::database::record_store::Record;
use crate::models::driver::Driver;
use crate::utils::dates::optional_date;

/// Situación de pago de la multa
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Canceled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "canceled" | "cancelled" => Ok(PaymentStatus::Canceled),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

/// Documento original adjunto a una multa importada
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub mime_type: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type.contains("pdf")
    }

    /// URL `data:` para visores externos
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    /// Nombre sugerido para descarga: `Documento_Multa_<titulo>.<ext>`
    pub fn suggested_file_name(&self, title: &str) -> String {
        let title = title.split_whitespace().collect::<Vec<_>>().join("_");
        let extension = if self.is_pdf() { "pdf" } else { "jpg" };
        format!("Documento_Multa_{}.{}", title, extension)
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// Fine - colección `fg_fines`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fine {
    pub id: Uuid,
    #[serde(rename = "autoInfraction")]
    pub ticket_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    pub plate: String,
    #[serde(default, with = "optional_date")]
    pub date: Option<NaiveDate>,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub value: Decimal,
    pub points: u32,
    #[serde(rename = "organ", default)]
    pub issuing_authority: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub indicates_driver: bool,
    #[serde(default)]
    pub pay_double: bool,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub observations: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Record for Fine {
    const COLLECTION: &'static str = "fg_fines";
    const ENTITY: &'static str = "Fine";
    const KEY_FIELD: &'static str = "ticket number";

    fn id(&self) -> Uuid {
        self.id
    }

    fn natural_key(&self) -> &str {
        &self.ticket_number
    }
}

impl Fine {
    /// Multa vacía con la clave natural, placa y situación pendiente
    pub fn new(ticket_number: impl Into<String>, plate: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            ticket_number: ticket_number.into(),
            driver_id: None,
            driver_name: None,
            plate: plate.into(),
            date: None,
            code: String::new(),
            description: String::new(),
            value: Decimal::ZERO,
            points: 0,
            issuing_authority: String::new(),
            location: String::new(),
            indicates_driver: false,
            pay_double: false,
            payment_status: PaymentStatus::Pending,
            observations: String::new(),
            attachment: None,
        }
    }

    /// Asigna (o limpia) el motorista, manteniendo id y nombre consistentes
    pub fn assign_driver(&mut self, driver: Option<&Driver>) {
        match driver {
            Some(driver) => {
                self.driver_id = Some(driver.id);
                self.driver_name = Some(driver.name.clone());
            }
            None => {
                self.driver_id = None;
                self.driver_name = None;
            }
        }
    }

    /// Valor con dos decimales para exhibición
    pub fn display_value(&self) -> String {
        format!("{:.2}", self.value.round_dp(2))
    }
}

/// Referencia al motorista tal como llega del formulario o del documento
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum DriverRef {
    Id(Uuid),
    Name(String),
}

/// Request para crear una multa (formulario o importación)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateFineRequest {
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub ticket_number: String,

    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub plate: String,

    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub code: String,

    #[validate(custom = "crate::utils::validation::validate_optional_date")]
    pub date: String,

    pub driver: Option<DriverRef>,

    /// Solo se respeta si el código no está en el catálogo
    pub description: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_money")]
    pub value: Option<Decimal>,

    pub points: Option<u32>,

    pub issuing_authority: String,
    pub location: String,
    pub indicates_driver: bool,
    pub pay_double: bool,
    pub payment_status: PaymentStatus,
    pub observations: String,
    pub attachment: Option<Attachment>,
}
