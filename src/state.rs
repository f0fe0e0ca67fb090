//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación: la
//! configuración, el record store abierto y el extractor de documentos.
//! Los servicios se construyen a pedido sobre el mismo store.

use std::sync::Arc;

use chrono::{Datelike, Local};

use crate::config::AppConfig;
use crate::database::RecordStore;
use crate::repositories::{
    DriverRepository, FineRepository, InfractionCodeRepository, VehicleRepository,
};
use crate::services::{
    ComplianceService, DocumentExtractor, DriverService, FineService, GeminiExtractor,
    ImportService, InfractionCodeService, SessionService, VehicleService,
};
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: RecordStore,
    extractor: Option<Arc<dyn DocumentExtractor>>,
}

impl AppState {
    /// Abre el backend configurado; el extractor Gemini solo existe si hay
    /// API key
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let store = RecordStore::new(config.storage.open_backend()?);
        let extractor = config.gemini_api_key.as_ref().map(|key| {
            Arc::new(GeminiExtractor::new(key.clone(), config.gemini_model.clone()))
                as Arc<dyn DocumentExtractor>
        });
        Ok(Self {
            config,
            store,
            extractor,
        })
    }

    /// Estado sobre un store y extractor ya construidos
    pub fn with_parts(
        config: AppConfig,
        store: RecordStore,
        extractor: Option<Arc<dyn DocumentExtractor>>,
    ) -> Self {
        Self {
            config,
            store,
            extractor,
        }
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.store.clone())
    }

    pub fn drivers(&self) -> DriverService {
        DriverService::new(DriverRepository::new(self.store.clone()))
    }

    pub fn vehicles(&self) -> VehicleService {
        VehicleService::new(VehicleRepository::new(self.store.clone()))
    }

    pub fn codes(&self) -> InfractionCodeService {
        InfractionCodeService::new(InfractionCodeRepository::new(self.store.clone()))
    }

    pub fn fines(&self) -> FineService {
        FineService::new(
            FineRepository::new(self.store.clone()),
            DriverRepository::new(self.store.clone()),
            InfractionCodeRepository::new(self.store.clone()),
        )
    }

    pub fn compliance(&self) -> ComplianceService {
        ComplianceService::new(DriverRepository::new(self.store.clone()))
    }

    /// Importación de documentos; requiere un extractor configurado
    pub fn importer(&self) -> AppResult<ImportService> {
        let extractor = self.extractor.clone().ok_or_else(|| {
            AppError::Config("GEMINI_API_KEY must be set to import documents".to_string())
        })?;
        Ok(ImportService::new(
            extractor,
            self.drivers(),
            self.vehicles(),
            self.codes(),
            self.fines(),
            Local::now().year(),
        ))
    }
}
