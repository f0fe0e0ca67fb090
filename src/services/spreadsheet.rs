//! Planillas Excel
//!
//! Convierte la primera hoja de un libro (xls, xlsx, xlsb u ods) en texto
//! CSV para enviarlo al extractor por el mismo camino que un CSV exportado.
//! Las fechas se escriben como `YYYY-MM-DD`.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveTime;
use tracing::debug;

use crate::utils::errors::{extraction_error, AppResult};

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(value) => match value.as_datetime() {
            Some(dt) if dt.time() == NaiveTime::MIN => dt.format("%Y-%m-%d").to_string(),
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => value.as_f64().to_string(),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Escapa un campo CSV (comillas, comas y saltos de línea)
fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Primera hoja del libro como CSV
pub fn first_sheet_to_csv(file_name: &str, bytes: &[u8]) -> AppResult<String> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| extraction_error(file_name, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| extraction_error(file_name, "the workbook has no sheets"))?
        .map_err(|e| extraction_error(file_name, e))?;

    let mut csv = String::new();
    for row in range.rows() {
        let line: Vec<String> = row.iter().map(|cell| csv_field(&cell_text(cell))).collect();
        csv.push_str(&line.join(","));
        csv.push('\n');
    }

    debug!("📊 {}: {} filas convertidas a CSV", file_name, range.height());
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("5010"), "5010");
        assert_eq!(csv_field("Dirigir, sem CNH"), "\"Dirigir, sem CNH\"");
        assert_eq!(csv_field("dito \"grave\""), "\"dito \"\"grave\"\"\"");
    }

    #[test]
    fn test_first_sheet_to_csv() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Código").unwrap();
        sheet.write_string(0, 1, "Infração").unwrap();
        sheet.write_string(0, 2, "Valor").unwrap();
        sheet.write_string(0, 3, "Pontos").unwrap();
        sheet.write_string(1, 0, "5010").unwrap();
        sheet.write_string(1, 1, "Dirigir sem possuir CNH, gravíssima").unwrap();
        sheet.write_number(1, 2, 130.16).unwrap();
        sheet.write_number(1, 3, 4).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let csv = first_sheet_to_csv("tabela.xlsx", &bytes).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Código,Infração,Valor,Pontos");
        assert_eq!(lines[1], "5010,\"Dirigir sem possuir CNH, gravíssima\",130.16,4");
    }

    #[test]
    fn test_garbage_is_an_extraction_failure() {
        let err = first_sheet_to_csv("quebrado.xlsx", b"not a workbook").unwrap_err();
        assert!(matches!(err, crate::utils::errors::AppError::ExtractionFailure(_)));
    }
}
