//! Servicio de multas
//!
//! Alta y edición de multas pasando siempre por el motor de cálculo:
//! - en el alta el código pedido se aplica como cambio de código, con la
//!   opción "pagar dobrado" ya fijada;
//! - en la edición, si cambió el código o la opción respecto de la multa
//!   guardada corre el disparador correspondiente; si no, la edición se
//!   guarda tal cual (un valor corregido a mano sobrevive hasta el próximo
//!   disparador).
//!
//! El par `driver_id`/`driver_name` se resuelve contra la colección de
//! motoristas cada vez que cambia alguno de los dos.

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Attachment, CreateFineRequest, Driver, DriverRef, Fine, PaymentStatus};
use crate::repositories::{DriverRepository, FineRepository, InfractionCodeRepository};
use crate::services::fine_computation_service::FineComputation;
use crate::utils::dates::parse_optional_date;
use crate::utils::errors::AppResult;

/// Resuelve la referencia y actualiza ambos lados del par.
///
/// Una referencia desconocida (o un nombre vacío) limpia el par.
pub fn assign_driver_ref(fine: &mut Fine, driver_ref: &DriverRef, drivers: &[Driver]) -> bool {
    let found = match driver_ref {
        DriverRef::Id(id) => drivers.iter().find(|d| d.id == *id),
        DriverRef::Name(name) if name.trim().is_empty() => None,
        DriverRef::Name(name) => drivers.iter().find(|d| &d.name == name),
    };

    if found.is_none() {
        warn!("🪪 Motorista {:?} no encontrado, referencia limpiada", driver_ref);
    }
    fine.assign_driver(found);
    found.is_some()
}

#[derive(Clone)]
pub struct FineService {
    fines: FineRepository,
    drivers: DriverRepository,
    codes: InfractionCodeRepository,
}

impl FineService {
    pub fn new(
        fines: FineRepository,
        drivers: DriverRepository,
        codes: InfractionCodeRepository,
    ) -> Self {
        Self {
            fines,
            drivers,
            codes,
        }
    }

    /// Registrar una multa nueva; auto de infracción duplicado se rechaza
    pub fn register_fine(&self, request: CreateFineRequest) -> AppResult<Fine> {
        request.validate()?;

        let catalog = self.codes.list()?;
        let engine = FineComputation::new(&catalog);

        let mut fine = Fine::new(request.ticket_number, request.plate);
        fine.date = parse_optional_date("date", &request.date)?;
        fine.description = request.description.unwrap_or_default();
        fine.value = request.value.unwrap_or(Decimal::ZERO);
        fine.points = request.points.unwrap_or(0);
        fine.issuing_authority = request.issuing_authority;
        fine.location = request.location;
        fine.indicates_driver = request.indicates_driver;
        fine.pay_double = request.pay_double;
        fine.payment_status = request.payment_status;
        fine.observations = request.observations;
        fine.attachment = request.attachment;

        if let Some(driver_ref) = &request.driver {
            let drivers = self.drivers.list()?;
            assign_driver_ref(&mut fine, driver_ref, &drivers);
        }

        engine.on_code_changed(&mut fine, &request.code);

        let fine = self.fines.create(fine)?;
        info!(
            "🚨 Multa {} registrada (código {}, R$ {}, {} pts)",
            fine.ticket_number,
            fine.code,
            fine.display_value(),
            fine.points
        );
        Ok(fine)
    }

    /// Guarda una multa editada; `false` si el id no existe
    pub fn update_fine(&self, edited: Fine) -> AppResult<bool> {
        let Some(stored) = self.fines.find_by_id(edited.id)? else {
            warn!("🔍 Multa {} no encontrada, edición ignorada", edited.id);
            return Ok(false);
        };

        let mut fine = edited;
        let catalog = self.codes.list()?;
        let engine = FineComputation::new(&catalog);

        if fine.code != stored.code {
            let code = fine.code.clone();
            engine.on_code_changed(&mut fine, &code);
        } else if fine.pay_double != stored.pay_double {
            let pay_double = fine.pay_double;
            engine.on_pay_double_toggled(&mut fine, pay_double);
        }

        if fine.driver_id != stored.driver_id {
            match fine.driver_id {
                Some(id) => {
                    let drivers = self.drivers.list()?;
                    assign_driver_ref(&mut fine, &DriverRef::Id(id), &drivers);
                }
                None => fine.assign_driver(None),
            }
        } else if fine.driver_name != stored.driver_name {
            match fine.driver_name.clone() {
                Some(name) => {
                    let drivers = self.drivers.list()?;
                    assign_driver_ref(&mut fine, &DriverRef::Name(name), &drivers);
                }
                None => fine.assign_driver(None),
            }
        }

        self.fines.update(fine)
    }

    /// Cambia el código de una multa guardada
    pub fn set_code(&self, id: Uuid, code: &str) -> AppResult<Option<Fine>> {
        self.edit(id, |fine| fine.code = code.to_string())
    }

    /// Alterna "pagar dobrado" en una multa guardada
    pub fn set_pay_double(&self, id: Uuid, pay_double: bool) -> AppResult<Option<Fine>> {
        self.edit(id, |fine| fine.pay_double = pay_double)
    }

    /// Asigna o quita el motorista de una multa guardada
    pub fn set_driver(&self, id: Uuid, driver_ref: Option<DriverRef>) -> AppResult<Option<Fine>> {
        let drivers = self.drivers.list()?;
        self.edit(id, |fine| match &driver_ref {
            Some(driver_ref) => {
                assign_driver_ref(fine, driver_ref, &drivers);
            }
            None => fine.assign_driver(None),
        })
    }

    pub fn set_payment_status(&self, id: Uuid, status: PaymentStatus) -> AppResult<Option<Fine>> {
        self.edit(id, |fine| fine.payment_status = status)
    }

    fn edit<F>(&self, id: Uuid, change: F) -> AppResult<Option<Fine>>
    where
        F: FnOnce(&mut Fine),
    {
        let Some(mut fine) = self.fines.find_by_id(id)? else {
            warn!("🔍 Multa {} no encontrada", id);
            return Ok(None);
        };

        change(&mut fine);
        self.update_fine(fine)?;
        self.fines.find_by_id(id)
    }

    pub fn list_fines(&self) -> AppResult<Vec<Fine>> {
        self.fines.list()
    }

    pub fn find_fine(&self, id: Uuid) -> AppResult<Option<Fine>> {
        self.fines.find_by_id(id)
    }

    /// Búsqueda de multas por nombre de motorista
    pub fn fines_for_driver(&self, driver_name: &str) -> AppResult<Vec<Fine>> {
        self.fines.find_by_driver_name(driver_name)
    }

    /// Documento original adjunto (solo lectura, para visores)
    pub fn document(&self, id: Uuid) -> AppResult<Option<Attachment>> {
        Ok(self.fines.find_by_id(id)?.and_then(|fine| fine.attachment))
    }
}
