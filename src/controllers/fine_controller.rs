//! Controlador de multas
//!
//! Alta, listados, ediciones puntuales y el visor del documento original.
//! Al registrar una multa para un motorista con CNH vencida se agrega un
//! aviso a la salida; la multa se registra igual.

use std::path::Path;

use chrono::Local;
use uuid::Uuid;

use crate::models::{CreateFineRequest, DriverRef, Fine, PaymentStatus};
use crate::services::compliance_service::is_license_expired;
use crate::state::AppState;
use crate::utils::dates::format_br_date;
use crate::utils::errors::{not_found_error, AppResult};

fn summary_line(fine: &Fine) -> String {
    format!(
        "{:<14}  {:<8}  {:<24}  {:<6}  {:>9}  {:>3}  {:<3}  {:<9}  {}",
        fine.ticket_number,
        fine.plate,
        fine.driver_name.as_deref().unwrap_or("-"),
        fine.code,
        fine.display_value(),
        fine.points,
        if fine.pay_double { "NIC" } else { "" },
        fine.payment_status,
        format_br_date(fine.date)
    )
}

fn table(fines: &[Fine]) -> String {
    let mut out = format!(
        "{:<14}  {:<8}  {:<24}  {:<6}  {:>9}  {:>3}  {:<3}  {:<9}  {}\n",
        "TICKET", "PLATE", "DRIVER", "CODE", "VALUE", "PTS", "", "STATUS", "DATE"
    );
    for fine in fines {
        out.push_str(&summary_line(fine));
        out.push('\n');
    }
    out
}

fn detail(fine: &Fine) -> String {
    format!(
        "Fine {} ({})\n  Driver: {}\n  Code: {} - {}\n  Value: R$ {}  Points: {}{}\n  Status: {}",
        fine.ticket_number,
        fine.id,
        fine.driver_name.as_deref().unwrap_or("-"),
        fine.code,
        fine.description,
        fine.display_value(),
        fine.points,
        if fine.pay_double { "  (pay double)" } else { "" },
        fine.payment_status
    )
}

/// Aviso cuando el motorista asignado tiene la CNH vencida hoy
fn expired_license_warning(state: &AppState, fine: &Fine) -> AppResult<Option<String>> {
    let Some(driver_id) = fine.driver_id else {
        return Ok(None);
    };
    let today = Local::now().date_naive();
    Ok(state
        .drivers()
        .find_driver(driver_id)?
        .filter(|driver| is_license_expired(driver, today))
        .map(|driver| format!("Warning: {}'s CNH is expired.", driver.name)))
}

pub fn add(state: &AppState, request: CreateFineRequest) -> AppResult<String> {
    state.sessions().require_session()?;
    let fine = state.fines().register_fine(request)?;

    let mut out = detail(&fine);
    if let Some(warning) = expired_license_warning(state, &fine)? {
        out.push('\n');
        out.push_str(&warning);
    }
    Ok(out)
}

pub fn list(state: &AppState) -> AppResult<String> {
    state.sessions().require_session()?;
    let fines = state.fines().list_fines()?;
    if fines.is_empty() {
        return Ok("No fines registered.".to_string());
    }
    Ok(table(&fines))
}

pub fn search(state: &AppState, driver_name: &str) -> AppResult<String> {
    state.sessions().require_session()?;
    let fines = state.fines().fines_for_driver(driver_name)?;
    if fines.is_empty() {
        return Ok(format!("No fines for {}.", driver_name));
    }
    Ok(table(&fines))
}

fn edited(result: Option<Fine>, id: Uuid) -> String {
    match result {
        Some(fine) => detail(&fine),
        None => format!("No fine with id {}; nothing changed.", id),
    }
}

pub fn set_code(state: &AppState, id: Uuid, code: &str) -> AppResult<String> {
    state.sessions().require_session()?;
    Ok(edited(state.fines().set_code(id, code)?, id))
}

pub fn set_pay_double(state: &AppState, id: Uuid, pay_double: bool) -> AppResult<String> {
    state.sessions().require_session()?;
    Ok(edited(state.fines().set_pay_double(id, pay_double)?, id))
}

pub fn set_driver(state: &AppState, id: Uuid, driver: Option<DriverRef>) -> AppResult<String> {
    state.sessions().require_session()?;
    let result = state.fines().set_driver(id, driver)?;

    let mut out = edited(result.clone(), id);
    if let Some(fine) = result {
        if let Some(warning) = expired_license_warning(state, &fine)? {
            out.push('\n');
            out.push_str(&warning);
        }
    }
    Ok(out)
}

pub fn set_status(state: &AppState, id: Uuid, status: PaymentStatus) -> AppResult<String> {
    state.sessions().require_session()?;
    Ok(edited(state.fines().set_payment_status(id, status)?, id))
}

/// Cómo entregar el documento original de una multa
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutput<'a> {
    Describe,
    SaveTo(&'a str),
    DataUrl,
}

/// Visor del documento original: descripción, copia a un directorio o URL `data:`
pub fn document(state: &AppState, id: Uuid, output: DocumentOutput<'_>) -> AppResult<String> {
    state.sessions().require_session()?;
    let service = state.fines();
    let Some(fine) = service.find_fine(id)? else {
        return Err(not_found_error("Fine", &id.to_string()));
    };
    let Some(attachment) = fine.attachment else {
        return Ok(format!("Fine {} has no attached document.", fine.ticket_number));
    };

    let file_name = attachment.suggested_file_name(&fine.ticket_number);
    match output {
        DocumentOutput::SaveTo(dir) => {
            let path = Path::new(dir).join(&file_name);
            std::fs::write(&path, &attachment.data)?;
            Ok(format!("Document saved to {}", path.display()))
        }
        DocumentOutput::DataUrl => Ok(attachment.data_url()),
        DocumentOutput::Describe => Ok(format!(
            "{} ({}, {} bytes)",
            file_name,
            attachment.mime_type,
            attachment.data.len()
        )),
    }
}
