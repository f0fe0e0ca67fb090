//! Catálogo de códigos de infracción
//!
//! Los códigos solo entran por importación y no se editan.

use tracing::info;
use validator::Validate;

use crate::models::{CreateInfractionCodeRequest, InfractionCode};
use crate::repositories::InfractionCodeRepository;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct InfractionCodeService {
    codes: InfractionCodeRepository,
}

impl InfractionCodeService {
    pub fn new(codes: InfractionCodeRepository) -> Self {
        Self { codes }
    }

    pub fn register_code(&self, request: CreateInfractionCodeRequest) -> AppResult<InfractionCode> {
        request.validate()?;
        let code = self.codes.create(InfractionCode::from(request))?;
        info!("📚 Código {} agregado al catálogo", code.code);
        Ok(code)
    }

    /// Búsqueda exacta; el mismo código devuelve siempre el mismo registro
    pub fn find_infraction_code(&self, code: &str) -> AppResult<Option<InfractionCode>> {
        self.codes.find_by_code(code)
    }

    pub fn list_codes(&self) -> AppResult<Vec<InfractionCode>> {
        self.codes.list()
    }
}
