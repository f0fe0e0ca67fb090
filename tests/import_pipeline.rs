mod common;

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;

use common::{csv, logged_in_state, pdf, test_config, ScriptedExtractor};
use fleet_compliance::controllers::fine_controller::{self, DocumentOutput};
use fleet_compliance::database::{KeyValueBackend, MemoryBackend, RecordStore};
use fleet_compliance::services::gemini_extractor::build_request_body;
use fleet_compliance::services::{DocumentExtractor, RecordKind, SourceDocument};
use fleet_compliance::state::AppState;
use fleet_compliance::utils::errors::{storage_error, AppError, AppResult};

/// Backend en memoria que rechaza escrituras que contienen un marcador
struct RejectingBackend {
    inner: MemoryBackend,
    marker: &'static str,
}

impl KeyValueBackend for RejectingBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if value.contains(self.marker) {
            return Err(storage_error("disk full"));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.inner.remove(key)
    }

    fn name(&self) -> &'static str {
        "rejecting"
    }
}

/// Lee la tabla que recibiría el modelo y devuelve una fila del catálogo por línea
struct CatalogTableExtractor;

#[async_trait::async_trait]
impl DocumentExtractor for CatalogTableExtractor {
    async fn extract(&self, kind: RecordKind, document: &SourceDocument) -> AppResult<Vec<serde_json::Value>> {
        let body = build_request_body(kind, document)?;
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
        Ok(text
            .lines()
            .skip(2)
            .map(|line| {
                let cols: Vec<&str> = line.split(',').collect();
                json!({
                    "code": cols[0],
                    "description": cols[1],
                    "defaultValue": cols[2],
                    "defaultPoints": cols[3].parse::<u32>().unwrap(),
                })
            })
            .collect())
    }
}

fn catalog_rows() -> Vec<serde_json::Value> {
    vec![
        json!({ "code": "5010", "description": "Dirigir sem possuir CNH", "defaultValue": 130.16, "defaultPoints": 4 }),
        json!({ "code": "7455", "description": "Velocidade até 20% acima", "defaultValue": "130.16", "defaultPoints": 4 }),
    ]
}

#[tokio::test]
async fn test_failed_file_does_not_abort_batch() {
    let extractor = Arc::new(
        ScriptedExtractor::new()
            .returns("a.pdf", vec![json!({ "name": "Ana", "cpf": "111" })])
            .fails("b.pdf", "model overloaded")
            .returns("c.pdf", vec![json!({ "name": "Bruno", "cpf": "222" })]),
    );
    let state = logged_in_state(Some(extractor.clone()));

    let summary = state
        .importer()
        .unwrap()
        .import(RecordKind::Drivers, &[pdf("a.pdf"), pdf("b.pdf"), pdf("c.pdf")])
        .await
        .unwrap();

    assert_eq!(summary.files, 3);
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.failed_files, vec!["b.pdf".to_string()]);
    assert_eq!(extractor.calls(), vec!["a.pdf", "b.pdf", "c.pdf"]);

    let names: Vec<String> = state
        .drivers()
        .list_drivers()
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Ana", "Bruno"]);
}

#[tokio::test]
async fn test_duplicates_and_incomplete_records_are_skipped() {
    let extractor = Arc::new(ScriptedExtractor::new().returns(
        "crlv.pdf",
        vec![
            json!({ "plate": "ABC1D23", "renavam": "001", "brand": "FIAT", "model": "MOBI", "year": 2021 }),
            json!({ "plate": "ABC1D23", "renavam": "002" }),
            json!({ "plate": "", "renavam": "003" }),
            json!({ "plate": "XYZ9A87", "renavam": "004" }),
            json!("not an object"),
        ],
    ));
    let state = logged_in_state(Some(extractor));

    let summary = state
        .importer()
        .unwrap()
        .import(RecordKind::Vehicles, &[pdf("crlv.pdf")])
        .await
        .unwrap();

    assert_eq!(summary.extracted, 5);
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.invalid, 2);

    let vehicles = state.vehicles().list_vehicles().unwrap();
    assert_eq!(vehicles[0].renavam, "001");
    assert_eq!(vehicles[0].label(), "FIAT MOBI");
    // sin año en el documento: año corriente
    assert!(vehicles[1].year >= 2024);
}

#[tokio::test]
async fn test_imported_fines_follow_the_catalog() {
    let fine_rows = vec![json!({
        "autoInfraction": "AI-100",
        "plate": "ABC1D23",
        "code": "5010",
        "value": 999.99,
        "points": 7,
        "driverName": "Ana",
        "date": "15/03/2024",
        "organ": "DETRAN-SP",
        "indicatesDriver": true
    })];
    let extractor = Arc::new(
        ScriptedExtractor::new()
            .returns("detran.csv", catalog_rows())
            .returns("cnh.pdf", vec![json!({ "name": "Ana", "cpf": "111" })])
            .returns("multa.pdf", fine_rows),
    );
    let state = logged_in_state(Some(extractor));
    let importer = state.importer().unwrap();

    importer.import(RecordKind::InfractionCodes, &[csv("detran.csv")]).await.unwrap();
    importer.import(RecordKind::Drivers, &[pdf("cnh.pdf")]).await.unwrap();
    let summary = importer.import(RecordKind::Fines, &[pdf("multa.pdf")]).await.unwrap();
    assert_eq!(summary.accepted, 1);

    let fines = state.fines().list_fines().unwrap();
    let fine = &fines[0];
    assert_eq!(fine.value, Decimal::new(13016, 2));
    assert_eq!(fine.points, 4);
    assert_eq!(fine.description, "Dirigir sem possuir CNH");
    assert!(!fine.pay_double);
    assert_eq!(fine.driver_name.as_deref(), Some("Ana"));
    assert!(fine.driver_id.is_some());
    assert_eq!(fine.issuing_authority, "DETRAN-SP");
    assert!(fine.indicates_driver);

    let attachment = state.fines().document(fine.id).unwrap().unwrap();
    assert_eq!(attachment.mime_type, "application/pdf");
    assert_eq!(attachment.data, b"%PDF multa.pdf".to_vec());
}

#[tokio::test]
async fn test_spreadsheet_fines_carry_no_document() {
    let extractor = Arc::new(ScriptedExtractor::new().returns(
        "multas.csv",
        vec![json!({ "autoInfraction": "AI-200", "plate": "XYZ9A87", "code": "9999", "value": 88.38, "points": 3 })],
    ));
    let state = logged_in_state(Some(extractor));

    state
        .importer()
        .unwrap()
        .import(RecordKind::Fines, &[csv("multas.csv")])
        .await
        .unwrap();

    let fine = &state.fines().list_fines().unwrap()[0];
    assert_eq!(fine.attachment, None);
    // código fuera del catálogo: valores extraídos
    assert_eq!(fine.value, Decimal::new(8838, 2));
    assert_eq!(fine.points, 3);
}

#[tokio::test]
async fn test_unknown_driver_name_is_cleared() {
    let extractor = Arc::new(ScriptedExtractor::new().returns(
        "multa.pdf",
        vec![json!({ "autoInfraction": "AI-300", "plate": "ABC1D23", "code": "5010", "driverName": "Desconhecido" })],
    ));
    let state = logged_in_state(Some(extractor));

    state
        .importer()
        .unwrap()
        .import(RecordKind::Fines, &[pdf("multa.pdf")])
        .await
        .unwrap();

    let fine = &state.fines().list_fines().unwrap()[0];
    assert_eq!(fine.driver_id, None);
    assert_eq!(fine.driver_name, None);
}

#[test]
fn test_importer_requires_an_extractor() {
    let state = common::state_with(None);
    assert!(state.importer().is_err());
}

#[tokio::test]
async fn test_storage_failure_skips_only_that_file() {
    let extractor = Arc::new(
        ScriptedExtractor::new()
            .returns("a.pdf", vec![json!({ "name": "Zé", "cpf": "999" })])
            .returns("b.pdf", vec![json!({ "name": "Ana", "cpf": "111" })]),
    );
    let backend = RejectingBackend {
        inner: MemoryBackend::new(),
        marker: "\"cpf\":\"999\"",
    };
    let state = AppState::with_parts(
        test_config(),
        RecordStore::new(Arc::new(backend)),
        Some(extractor.clone()),
    );

    let summary = state
        .importer()
        .unwrap()
        .import(RecordKind::Drivers, &[pdf("a.pdf"), pdf("b.pdf")])
        .await
        .unwrap();

    assert_eq!(extractor.calls(), vec!["a.pdf", "b.pdf"]);
    assert_eq!(summary.files, 2);
    assert_eq!(summary.extracted, 2);
    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.failed_files, vec!["a.pdf".to_string()]);

    let names: Vec<String> = state
        .drivers()
        .list_drivers()
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Ana"]);
}

#[tokio::test]
async fn test_fine_document_viewer() {
    let extractor = Arc::new(ScriptedExtractor::new().returns(
        "multa.pdf",
        vec![json!({ "autoInfraction": "AI-400", "plate": "ABC1D23", "code": "5010", "value": 130.16, "points": 4 })],
    ));
    let state = logged_in_state(Some(extractor));
    state
        .importer()
        .unwrap()
        .import(RecordKind::Fines, &[pdf("multa.pdf")])
        .await
        .unwrap();
    let fine = state.fines().list_fines().unwrap().remove(0);

    let described = fine_controller::document(&state, fine.id, DocumentOutput::Describe).unwrap();
    assert_eq!(described, "Documento_Multa_AI-400.pdf (application/pdf, 14 bytes)");

    let url = fine_controller::document(&state, fine.id, DocumentOutput::DataUrl).unwrap();
    assert_eq!(url, "data:application/pdf;base64,JVBERiBtdWx0YS5wZGY=");

    let missing = uuid::Uuid::new_v4();
    let err = fine_controller::document(&state, missing, DocumentOutput::Describe).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.user_message(), format!("Fine with id '{}' not found", missing));
}

#[tokio::test]
async fn test_catalog_imports_from_excel_workbook() {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Código", "Infração", "Valor", "Pontos"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 0, "5010").unwrap();
    sheet.write_string(1, 1, "Dirigir sem possuir CNH").unwrap();
    sheet.write_number(1, 2, 130.16).unwrap();
    sheet.write_number(1, 3, 4).unwrap();
    sheet.write_string(2, 0, "7455").unwrap();
    sheet.write_string(2, 1, "Velocidade até 20% acima").unwrap();
    sheet.write_number(2, 2, 130.16).unwrap();
    sheet.write_number(2, 3, 4).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let state = logged_in_state(Some(Arc::new(CatalogTableExtractor)));
    let document = SourceDocument::new(
        "tabela_detran.xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        bytes,
    );
    let summary = state
        .importer()
        .unwrap()
        .import(RecordKind::InfractionCodes, &[document])
        .await
        .unwrap();

    assert!(summary.failed_files.is_empty());
    assert_eq!(summary.accepted, 2);
    let code = state.codes().find_infraction_code("5010").unwrap().unwrap();
    assert_eq!(code.description, "Dirigir sem possuir CNH");
    assert_eq!(code.default_value, Decimal::new(13016, 2));
    assert_eq!(code.default_points, 4);
}
