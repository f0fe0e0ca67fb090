//! Alertas de vencimiento de CNH
//!
//! Un motorista entra en alerta cuando su CNH ya venció o vence dentro de
//! los próximos 30 días (inclusive). Una validez vacía significa
//! "desconocida" y nunca genera alerta. Las alertas se recalculan en cada
//! llamada a partir de la colección actual; no hay caché.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveTime};
use tracing::info;

use crate::models::Driver;
use crate::repositories::DriverRepository;
use crate::utils::errors::AppResult;

/// Horizonte de alerta en días
pub const ALERT_HORIZON_DAYS: i64 = 30;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Situación de la CNH de un motorista
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    NotInformed,
    Expired,
    ExpiringIn(i64),
    Regular,
}

impl LicenseStatus {
    pub fn needs_attention(&self) -> bool {
        matches!(self, LicenseStatus::Expired | LicenseStatus::ExpiringIn(_))
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseStatus::NotInformed => f.write_str("Not Informed"),
            LicenseStatus::Expired => f.write_str("Expired"),
            LicenseStatus::ExpiringIn(days) => write!(f, "Expiring in {} days", days),
            LicenseStatus::Regular => f.write_str("Regular"),
        }
    }
}

/// Días restantes hasta el vencimiento: techo de la diferencia en
/// milisegundos dividida por un día. Para fechas de calendario equivale a
/// la diferencia en días; negativo si ya venció.
pub fn days_remaining(validity: NaiveDate, as_of: NaiveDate) -> i64 {
    let expiry = validity.and_time(NaiveTime::MIN);
    let start = as_of.and_time(NaiveTime::MIN);
    let diff_ms = (expiry - start).num_milliseconds();
    ceil_div(diff_ms, DAY_MS)
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator.div_euclid(denominator);
    if numerator.rem_euclid(denominator) == 0 {
        quotient
    } else {
        quotient + 1
    }
}

/// Clasificación de la CNH para listados
pub fn license_status(validity: Option<NaiveDate>, as_of: NaiveDate) -> LicenseStatus {
    let Some(validity) = validity else {
        return LicenseStatus::NotInformed;
    };

    let days = days_remaining(validity, as_of);
    if days < 0 {
        LicenseStatus::Expired
    } else if days <= ALERT_HORIZON_DAYS {
        LicenseStatus::ExpiringIn(days)
    } else {
        LicenseStatus::Regular
    }
}

/// Motoristas que requieren atención, en el orden de entrada
pub fn evaluate(drivers: &[Driver], as_of: NaiveDate) -> Vec<Driver> {
    drivers
        .iter()
        .filter(|d| {
            d.validity_date
                .map(|validity| days_remaining(validity, as_of) <= ALERT_HORIZON_DAYS)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// CNH vencida a la fecha indicada (aviso al registrar una multa)
pub fn is_license_expired(driver: &Driver, as_of: NaiveDate) -> bool {
    license_status(driver.validity_date, as_of) == LicenseStatus::Expired
}

/// Servicio de alertas sobre la colección de motoristas
#[derive(Clone)]
pub struct ComplianceService {
    drivers: DriverRepository,
}

impl ComplianceService {
    pub fn new(drivers: DriverRepository) -> Self {
        Self { drivers }
    }

    /// Alertas a una fecha dada, leyendo siempre la colección actual
    pub fn alerts(&self, as_of: NaiveDate) -> AppResult<Vec<Driver>> {
        let drivers = self.drivers.list()?;
        let alerts = evaluate(&drivers, as_of);
        info!("🔔 {} de {} motoristas con CNH en alerta", alerts.len(), drivers.len());
        Ok(alerts)
    }

    /// Alertas a la fecha local de hoy
    pub fn alerts_today(&self) -> AppResult<Vec<Driver>> {
        self.alerts(Local::now().date_naive())
    }

    /// Todos los motoristas con su situación de CNH
    pub fn license_report(&self, as_of: NaiveDate) -> AppResult<Vec<(Driver, LicenseStatus)>> {
        Ok(self
            .drivers
            .list()?
            .into_iter()
            .map(|d| {
                let status = license_status(d.validity_date, as_of);
                (d, status)
            })
            .collect())
    }
}
