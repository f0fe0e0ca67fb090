//! Extractor basado en Gemini
//!
//! Envía cada documento a la API `generateContent` con un prompt y un
//! esquema JSON por tipo de registro. PDF e imágenes van en línea (base64);
//! los CSV van como texto. Los binarios de Excel no se convierten aquí: se
//! rechazan pidiendo exportar a CSV.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::services::document_extractor::{DocumentExtractor, RecordKind, SourceDocument};
use crate::services::spreadsheet::first_sheet_to_csv;
use crate::utils::errors::{extraction_error, AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const STRUCTURED_INPUT_HINT: &str = " The input is structured text data.";

#[derive(Clone)]
pub struct GeminiExtractor {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiExtractor {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Cambia el host de la API (proxies o servidores de prueba)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

fn prompt_for(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Drivers => {
            "Extract driver license (CNH) data. Return JSON list with keys: name, cpf, cnhNumber, validityDate (YYYY-MM-DD format)."
        }
        RecordKind::Vehicles => {
            "Extract vehicle document (CRLV) data. Return JSON list with keys: plate, renavam, chassis, brand, model, year. \
             IMPORTANT: 'brand' and 'model' are often written together as 'MARCA/MODELO' (e.g., FIAT/MOBI or VW/GOL). \
             Please split them into the brand and model fields. If you cannot split them, put the combined string in 'model' and leave 'brand' empty."
        }
        RecordKind::Fines => {
            "Extract traffic fine (multa) data. Return JSON list. Map 'autoInfraction' to the fine number/code. 'indicatesDriver' should be boolean."
        }
        RecordKind::InfractionCodes => {
            "Extract Detran infraction codes, descriptions, values, and points from this list. Return JSON."
        }
    }
}

fn csv_hint_for(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::InfractionCodes => " Columns might be named 'Código', 'Infração', 'Valor', 'Pontos'.",
        _ => "",
    }
}

fn item_properties(kind: RecordKind) -> Value {
    match kind {
        RecordKind::Drivers => json!({
            "name": { "type": "STRING" },
            "cpf": { "type": "STRING" },
            "cnhNumber": { "type": "STRING" },
            "validityDate": { "type": "STRING" }
        }),
        RecordKind::Vehicles => json!({
            "plate": { "type": "STRING" },
            "renavam": { "type": "STRING" },
            "chassis": { "type": "STRING" },
            "brand": { "type": "STRING" },
            "model": { "type": "STRING" },
            "year": { "type": "INTEGER" }
        }),
        RecordKind::Fines => json!({
            "driverName": { "type": "STRING", "nullable": true },
            "plate": { "type": "STRING" },
            "autoInfraction": { "type": "STRING" },
            "date": { "type": "STRING" },
            "code": { "type": "STRING" },
            "description": { "type": "STRING" },
            "value": { "type": "NUMBER" },
            "organ": { "type": "STRING" },
            "indicatesDriver": { "type": "BOOLEAN" },
            "location": { "type": "STRING" },
            "points": { "type": "INTEGER" },
            "observations": { "type": "STRING", "nullable": true }
        }),
        RecordKind::InfractionCodes => json!({
            "code": { "type": "STRING" },
            "description": { "type": "STRING" },
            "defaultValue": { "type": "NUMBER" },
            "defaultPoints": { "type": "INTEGER" }
        }),
    }
}

/// Esquema de respuesta: lista de objetos planos
pub fn response_schema(kind: RecordKind) -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": item_properties(kind)
        }
    })
}

/// Cuerpo del request `generateContent` para un documento
pub fn build_request_body(kind: RecordKind, document: &SourceDocument) -> AppResult<Value> {
    let mut prompt = prompt_for(kind).to_string();

    let content_part = if document.is_spreadsheet() {
        let text = if document.is_csv() {
            String::from_utf8_lossy(&document.bytes).into_owned()
        } else {
            first_sheet_to_csv(&document.name, &document.bytes)?
        };
        prompt.push_str(STRUCTURED_INPUT_HINT);
        prompt.push_str(csv_hint_for(kind));
        json!({ "text": format!("Data from Excel/CSV:\n{}", text) })
    } else {
        json!({
            "inlineData": {
                "mimeType": document.mime_type,
                "data": STANDARD.encode(&document.bytes)
            }
        })
    };

    Ok(json!({
        "contents": [{
            "parts": [content_part, { "text": prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(kind)
        }
    }))
}

/// Extrae la lista JSON del texto de la primera candidata.
/// Una respuesta sin texto o que no es una lista produce una lista vacía.
pub fn parse_response(response: &Value) -> AppResult<Vec<Value>> {
    let text: String = response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(&text)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

#[async_trait::async_trait]
impl DocumentExtractor for GeminiExtractor {
    async fn extract(&self, kind: RecordKind, document: &SourceDocument) -> AppResult<Vec<Value>> {
        let body = build_request_body(kind, document)?;
        info!("🤖 Extrayendo {} de {} ({})", kind, document.name, document.mime_type);

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        let status = response.status();
        debug!("📡 Gemini respondió {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("❌ Extracción falló con estado {}: {}", status, error_text);
            return Err(extraction_error(&document.name, format!("API status {}", status)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        let items = parse_response(&payload)
            .map_err(|e| extraction_error(&document.name, e))?;
        info!("✅ {} objetos extraídos de {}", items.len(), document.name);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_goes_inline() {
        let document = SourceDocument::new("multa.pdf", "application/pdf", b"%PDF".to_vec());
        let body = build_request_body(RecordKind::Fines, &document).unwrap();

        let inline = &body["contents"][0]["parts"][0]["inlineData"];
        assert_eq!(inline["mimeType"], "application/pdf");
        assert_eq!(inline["data"], STANDARD.encode(b"%PDF"));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["items"]["properties"]["autoInfraction"]["type"],
            "STRING"
        );
    }

    #[test]
    fn test_csv_goes_as_text() {
        let document = SourceDocument::new("tabela.csv", "text/csv", b"Codigo;Valor\n5010;130,16".to_vec());
        let body = build_request_body(RecordKind::InfractionCodes, &document).unwrap();

        let data = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(data.starts_with("Data from Excel/CSV:\n"));
        assert!(data.contains("5010;130,16"));

        let prompt = body["contents"][0]["parts"][1]["text"].as_str().unwrap();
        assert!(prompt.contains("structured text data"));
        assert!(prompt.contains("'Pontos'"));
    }

    #[test]
    fn test_excel_workbook_goes_as_csv_text() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Código").unwrap();
        sheet.write_string(0, 1, "Valor").unwrap();
        sheet.write_string(1, 0, "5010").unwrap();
        sheet.write_number(1, 1, 130.16).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let document = SourceDocument::new(
            "tabela_detran.xlsx",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            bytes,
        );
        let body = build_request_body(RecordKind::InfractionCodes, &document).unwrap();

        let data = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(data.starts_with("Data from Excel/CSV:\n"));
        assert!(data.contains("Código,Valor"));
        assert!(data.contains("5010,130.16"));
        assert!(body["contents"][0]["parts"][0].get("inlineData").is_none());
    }

    #[test]
    fn test_corrupt_workbook_is_rejected() {
        let document = SourceDocument::new("multas.xlsx", "application/octet-stream", vec![0x50, 0x4b]);
        let err = build_request_body(RecordKind::Fines, &document).unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailure(_)));
    }

    #[test]
    fn test_parse_response_array() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[{\"plate\":\"ABC1D23\"}]" }] }
            }]
        });
        let items = parse_response(&response).unwrap();
        assert_eq!(items, vec![json!({ "plate": "ABC1D23" })]);
    }

    #[test]
    fn test_parse_response_non_array_or_empty() {
        let object = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"plate\":\"X\"}" }] } }]
        });
        assert!(parse_response(&object).unwrap().is_empty());
        assert!(parse_response(&json!({ "candidates": [] })).unwrap().is_empty());
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        let response = json!({
            "candidates": [{ "content": { "parts": [{ "text": "not json" }] } }]
        });
        assert!(parse_response(&response).is_err());
    }

    #[test]
    fn test_endpoint_uses_model() {
        let extractor = GeminiExtractor::new("k", "gemini-3-flash-preview").with_base_url("http://localhost:9/");
        assert_eq!(
            extractor.endpoint(),
            "http://localhost:9/v1beta/models/gemini-3-flash-preview:generateContent?key=k"
        );
    }
}
