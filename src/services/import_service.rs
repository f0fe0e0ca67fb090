//! Servicio de importación
//!
//! Procesa los archivos de un lote en secuencia, esperando cada extracción.
//! Un archivo cuya extracción o guardado falla se registra y el lote
//! continúa con el siguiente. Cada objeto
//! extraído pasa por la misma validación y guardia de unicidad que el alta
//! manual; los inválidos y duplicados se cuentan y se descartan.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::dto::{DriverCandidate, FineCandidate, InfractionCodeCandidate, VehicleCandidate};
use crate::models::{Attachment, CreateInfractionCodeRequest};
use crate::services::document_extractor::{DocumentExtractor, RecordKind, SourceDocument};
use crate::services::driver_service::DriverService;
use crate::services::fine_service::FineService;
use crate::services::infraction_code_service::InfractionCodeService;
use crate::services::vehicle_service::VehicleService;
use crate::utils::errors::{AppError, AppResult};

/// Resultado de un objeto extraído
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Accepted,
    Duplicate,
    Invalid,
}

/// Totales de un lote de importación
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub files: usize,
    pub extracted: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub failed_files: Vec<String>,
}

impl ImportSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Accepted => self.accepted += 1,
            Outcome::Duplicate => self.duplicates += 1,
            Outcome::Invalid => self.invalid += 1,
        }
    }

    /// Mensaje para el usuario al terminar el lote
    pub fn message(&self) -> String {
        let mut message = format!("{} records imported successfully!", self.accepted);
        if self.duplicates > 0 {
            message.push_str(&format!(" {} duplicates skipped.", self.duplicates));
        }
        if self.invalid > 0 {
            message.push_str(&format!(" {} incomplete records skipped.", self.invalid));
        }
        if !self.failed_files.is_empty() {
            message.push_str(&format!(
                " Extraction failed for: {}.",
                self.failed_files.join(", ")
            ));
        }
        message
    }
}

fn classify<T>(result: AppResult<T>) -> AppResult<Outcome> {
    match result {
        Ok(_) => Ok(Outcome::Accepted),
        Err(AppError::DuplicateKey { entity, value, .. }) => {
            debug!("♻️ {} {} ya existe, descartado", entity, value);
            Ok(Outcome::Duplicate)
        }
        Err(AppError::Validation(e)) => {
            debug!("⚠️ Registro incompleto descartado: {}", e);
            Ok(Outcome::Invalid)
        }
        Err(e) => Err(e),
    }
}

fn candidate<T: DeserializeOwned>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(candidate) => Some(candidate),
        Err(e) => {
            debug!("⚠️ Objeto extraído ilegible: {}", e);
            None
        }
    }
}

#[derive(Clone)]
pub struct ImportService {
    extractor: Arc<dyn DocumentExtractor>,
    drivers: DriverService,
    vehicles: VehicleService,
    codes: InfractionCodeService,
    fines: FineService,
    default_year: i32,
}

impl ImportService {
    pub fn new(
        extractor: Arc<dyn DocumentExtractor>,
        drivers: DriverService,
        vehicles: VehicleService,
        codes: InfractionCodeService,
        fines: FineService,
        default_year: i32,
    ) -> Self {
        Self {
            extractor,
            drivers,
            vehicles,
            codes,
            fines,
            default_year,
        }
    }

    /// Importa un lote de archivos del tipo indicado
    pub async fn import(
        &self,
        kind: RecordKind,
        documents: &[SourceDocument],
    ) -> AppResult<ImportSummary> {
        let mut summary = ImportSummary {
            files: documents.len(),
            ..Default::default()
        };
        info!("📥 Importando {} archivo(s) de {}", documents.len(), kind);

        for document in documents {
            let items = match self.extractor.extract(kind, document).await {
                Ok(items) => items,
                Err(e) => {
                    error!("❌ Error extrayendo {}: {}", document.name, e);
                    summary.failed_files.push(document.name.clone());
                    continue;
                }
            };

            summary.extracted += items.len();
            for item in items {
                match self.store_item(kind, item, document) {
                    Ok(outcome) => summary.record(outcome),
                    Err(e) => {
                        error!("❌ Error guardando registros de {}: {}", document.name, e);
                        summary.failed_files.push(document.name.clone());
                        break;
                    }
                }
            }
        }

        if summary.failed_files.is_empty() {
            info!(
                "✅ Importación terminada: {} aceptados, {} duplicados, {} inválidos",
                summary.accepted, summary.duplicates, summary.invalid
            );
        } else {
            warn!(
                "⚠️ Importación parcial: {} aceptados, {} archivo(s) fallaron",
                summary.accepted,
                summary.failed_files.len()
            );
        }
        Ok(summary)
    }

    fn store_item(
        &self,
        kind: RecordKind,
        item: Value,
        document: &SourceDocument,
    ) -> AppResult<Outcome> {
        match kind {
            RecordKind::Drivers => match candidate::<DriverCandidate>(item) {
                Some(c) => classify(self.drivers.register_driver(c.into())),
                None => Ok(Outcome::Invalid),
            },
            RecordKind::Vehicles => match candidate::<VehicleCandidate>(item) {
                Some(c) => classify(
                    self.vehicles
                        .register_vehicle(c.into_request(self.default_year)),
                ),
                None => Ok(Outcome::Invalid),
            },
            RecordKind::InfractionCodes => match candidate::<InfractionCodeCandidate>(item) {
                Some(c) => classify(
                    self.codes
                        .register_code(CreateInfractionCodeRequest::from(c)),
                ),
                None => Ok(Outcome::Invalid),
            },
            RecordKind::Fines => match candidate::<FineCandidate>(item) {
                Some(c) => {
                    let attachment = if document.is_spreadsheet() {
                        None
                    } else {
                        Some(Attachment::new(
                            document.mime_type.clone(),
                            document.bytes.clone(),
                        ))
                    };
                    classify(self.fines.register_fine(c.into_request(attachment)))
                }
                None => Ok(Outcome::Invalid),
            },
        }
    }
}
