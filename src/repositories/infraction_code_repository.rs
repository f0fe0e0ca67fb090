use crate::database::RecordStore;
use crate::models::InfractionCode;
use crate::utils::errors::AppResult;

/// Acceso al catálogo de códigos de infracción.
///
/// No hay `update`: los códigos son inmutables una vez importados.
#[derive(Clone)]
pub struct InfractionCodeRepository {
    store: RecordStore,
}

impl InfractionCodeRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn create(&self, code: InfractionCode) -> AppResult<InfractionCode> {
        self.store.insert(code)
    }

    pub fn list(&self) -> AppResult<Vec<InfractionCode>> {
        self.store.list()
    }

    /// Búsqueda exacta por código
    pub fn find_by_code(&self, code: &str) -> AppResult<Option<InfractionCode>> {
        Ok(self.list()?.into_iter().find(|c| c.code == code))
    }
}
