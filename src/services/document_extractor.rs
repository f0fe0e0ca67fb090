//! Extracción de documentos
//!
//! Frontera asíncrona con el colaborador que convierte documentos (PDF,
//! imagen, planilla exportada a CSV) en objetos JSON. El resultado no es
//! confiable; el servicio de importación valida cada objeto.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::utils::errors::AppResult;

/// Tipo de registro a extraer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Drivers,
    Vehicles,
    Fines,
    InfractionCodes,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Drivers => "drivers",
            RecordKind::Vehicles => "vehicles",
            RecordKind::Fines => "fines",
            RecordKind::InfractionCodes => "codes",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drivers" | "driver" => Ok(RecordKind::Drivers),
            "vehicles" | "vehicle" => Ok(RecordKind::Vehicles),
            "fines" | "fine" => Ok(RecordKind::Fines),
            "codes" | "code" | "detran" => Ok(RecordKind::InfractionCodes),
            other => Err(format!("unknown record kind '{}'", other)),
        }
    }
}

/// Archivo fuente tal como lo entrega el usuario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Lee el archivo e infiere el tipo MIME por la extensión
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_for_extension(path);
        Ok(Self::new(name, mime_type, bytes))
    }

    /// Planilla (xls, xlsx, xlsb, ods o csv): se envía como texto y sus
    /// multas no llevan documento adjunto
    pub fn is_spreadsheet(&self) -> bool {
        let name = self.name.to_ascii_lowercase();
        [".xls", ".xlsx", ".xlsb", ".ods"].iter().any(|ext| name.ends_with(ext))
            || self.is_csv()
            || self.mime_type.contains("sheet")
            || self.mime_type.contains("excel")
    }

    pub fn is_csv(&self) -> bool {
        self.mime_type == "text/csv" || self.name.to_ascii_lowercase().ends_with(".csv")
    }
}

fn mime_for_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "csv" => "text/csv",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xlsb" => "application/vnd.ms-excel.sheet.binary.macroenabled.12",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        _ => "application/octet-stream",
    }
}

/// Colaborador de extracción: una llamada por archivo
#[async_trait::async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(
        &self,
        kind: RecordKind,
        document: &SourceDocument,
    ) -> AppResult<Vec<serde_json::Value>>;
}
