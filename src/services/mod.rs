//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: altas y
//! ediciones de cada colección, el motor de cálculo de multas, las alertas
//! de CNH, la sesión y la importación de documentos.

pub mod compliance_service;
pub mod document_extractor;
pub mod driver_service;
pub mod fine_computation_service;
pub mod fine_service;
pub mod gemini_extractor;
pub mod import_service;
pub mod infraction_code_service;
pub mod session_service;
pub mod spreadsheet;
pub mod vehicle_service;

pub use compliance_service::{ComplianceService, LicenseStatus};
pub use document_extractor::{DocumentExtractor, RecordKind, SourceDocument};
pub use driver_service::DriverService;
pub use fine_computation_service::{Derivation, FineComputation};
pub use fine_service::FineService;
pub use gemini_extractor::GeminiExtractor;
pub use import_service::{ImportService, ImportSummary};
pub use infraction_code_service::InfractionCodeService;
pub use session_service::SessionService;
pub use vehicle_service::VehicleService;
