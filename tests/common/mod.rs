#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use fleet_compliance::config::{AppConfig, StorageConfig, StoreBackendKind};
use fleet_compliance::database::RecordStore;
use fleet_compliance::models::RegisterUserRequest;
use fleet_compliance::services::{DocumentExtractor, RecordKind, SourceDocument};
use fleet_compliance::state::AppState;
use fleet_compliance::utils::errors::{extraction_error, AppResult};

/// Extractor con respuestas fijas por nombre de archivo
#[derive(Default)]
pub struct ScriptedExtractor {
    responses: HashMap<String, Result<Vec<Value>, String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returns(mut self, file_name: &str, items: Vec<Value>) -> Self {
        self.responses.insert(file_name.to_string(), Ok(items));
        self
    }

    pub fn fails(mut self, file_name: &str, reason: &str) -> Self {
        self.responses
            .insert(file_name.to_string(), Err(reason.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DocumentExtractor for ScriptedExtractor {
    async fn extract(&self, _kind: RecordKind, document: &SourceDocument) -> AppResult<Vec<Value>> {
        self.calls.lock().unwrap().push(document.name.clone());
        match self.responses.get(&document.name) {
            Some(Ok(items)) => Ok(items.clone()),
            Some(Err(reason)) => Err(extraction_error(&document.name, reason)),
            None => Ok(Vec::new()),
        }
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        environment: "test".to_string(),
        storage: StorageConfig {
            backend: StoreBackendKind::Memory,
            ..Default::default()
        },
        gemini_api_key: None,
        gemini_model: "gemini-3-flash-preview".to_string(),
        log_level: "debug".to_string(),
    }
}

pub fn state_with(extractor: Option<Arc<dyn DocumentExtractor>>) -> AppState {
    AppState::with_parts(test_config(), RecordStore::in_memory(), extractor)
}

/// Estado con un usuario registrado y la sesión abierta
pub fn logged_in_state(extractor: Option<Arc<dyn DocumentExtractor>>) -> AppState {
    let state = state_with(extractor);
    let sessions = state.sessions();
    sessions
        .register(RegisterUserRequest {
            username: "gestor".to_string(),
            password: "frota123".to_string(),
            name: "Gestor de Frota".to_string(),
        })
        .unwrap();
    sessions.login("gestor", "frota123").unwrap();
    state
}

pub fn pdf(name: &str) -> SourceDocument {
    SourceDocument::new(name, "application/pdf", format!("%PDF {}", name).into_bytes())
}

pub fn csv(name: &str) -> SourceDocument {
    SourceDocument::new(name, "text/csv", b"col1;col2".to_vec())
}
