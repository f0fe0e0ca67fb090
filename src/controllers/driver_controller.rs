//! Controlador de motoristas y alertas de CNH

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::models::CreateDriverRequest;
use crate::services::compliance_service::days_remaining;
use crate::state::AppState;
use crate::utils::dates::{format_br_date, parse_optional_date};
use crate::utils::errors::AppResult;

/// Campos editables; `None` conserva el valor actual
#[derive(Debug, Default)]
pub struct DriverChanges {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub license_number: Option<String>,
    pub validity: Option<String>,
}

pub fn add(state: &AppState, request: CreateDriverRequest) -> AppResult<String> {
    state.sessions().require_session()?;
    let driver = state.drivers().register_driver(request)?;
    Ok(format!("Driver {} registered ({}).", driver.name, driver.id))
}

pub fn update(state: &AppState, id: Uuid, changes: DriverChanges) -> AppResult<String> {
    state.sessions().require_session()?;
    let service = state.drivers();
    let Some(mut driver) = service.find_driver(id)? else {
        return Ok(format!("No driver with id {}; nothing changed.", id));
    };

    if let Some(name) = changes.name {
        driver.name = name;
    }
    if let Some(cpf) = changes.cpf {
        driver.cpf = cpf;
    }
    if let Some(license_number) = changes.license_number {
        driver.license_number = license_number;
    }
    if let Some(validity) = changes.validity {
        driver.validity_date = parse_optional_date("validity_date", &validity)?;
    }

    service.update_driver(driver.clone())?;
    Ok(format!("Driver {} updated.", driver.name))
}

pub fn list(state: &AppState) -> AppResult<String> {
    state.sessions().require_session()?;
    let today = Local::now().date_naive();
    let report = state.compliance().license_report(today)?;
    if report.is_empty() {
        return Ok("No drivers registered.".to_string());
    }

    let attention = report.iter().filter(|(_, status)| status.needs_attention()).count();
    let mut out = format!(
        "{:<36}  {:<28}  {:<16}  {:<12}  {:<10}  {}\n",
        "ID", "NAME", "CPF", "CNH", "VALIDITY", "STATUS"
    );
    for (driver, status) in report {
        out.push_str(&format!(
            "{:<36}  {:<28}  {:<16}  {:<12}  {:<10}  {}\n",
            driver.id,
            driver.name,
            driver.cpf,
            driver.license_number,
            format_br_date(driver.validity_date),
            status
        ));
    }
    if attention > 0 {
        out.push_str(&format!(
            "{} driver(s) need attention; run `alerts` for details.\n",
            attention
        ));
    }
    Ok(out)
}

pub fn alerts(state: &AppState, as_of: Option<&str>) -> AppResult<String> {
    state.sessions().require_session()?;
    let as_of: NaiveDate = match as_of {
        Some(text) => parse_optional_date("as_of", text)?.unwrap_or_else(|| Local::now().date_naive()),
        None => Local::now().date_naive(),
    };

    let alerts = state.compliance().alerts(as_of)?;
    if alerts.is_empty() {
        return Ok("No CNH alerts.".to_string());
    }

    let mut out = format!("{} driver(s) need attention:\n", alerts.len());
    for driver in alerts {
        let Some(validity) = driver.validity_date else {
            continue;
        };
        let days = days_remaining(validity, as_of);
        let note = if days < 0 {
            format!("expired on {}", format_br_date(Some(validity)))
        } else {
            format!("expires in {} days ({})", days, format_br_date(Some(validity)))
        };
        out.push_str(&format!("  {} (CNH {}): {}\n", driver.name, driver.license_number, note));
    }
    Ok(out)
}
