//! Motor de cálculo de multas
//!
//! Mantiene descripción, valor y puntos de una multa sincronizados con el
//! código de infracción del catálogo y con la opción "pagar dobrado" (NIC):
//! quien paga el doble no recibe puntos en la CNH.
//!
//! Disparadores:
//! - el código cambia a un valor no vacío de al menos 3 caracteres;
//! - el código se borra: descripción, valor y puntos vuelven a vacío/cero;
//! - se alterna "pagar dobrado".
//!
//! Al alternar la opción los valores se derivan de nuevo desde el catálogo,
//! nunca desde el valor actual de la multa: un valor editado a mano se
//! pierde en ese momento.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{Fine, InfractionCode};

/// Largo mínimo del código para consultar el catálogo
pub const MIN_LOOKUP_CODE_LEN: usize = 3;

/// Qué hizo el motor con la multa
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// Código encontrado: descripción, valor y puntos derivados del catálogo
    Matched,
    /// Código sin correspondencia: valores manuales intactos
    Unmatched,
    /// Código borrado: descripción, valor y puntos reiniciados
    Cleared,
    /// Código demasiado corto para consultar: nada cambia
    Skipped,
}

/// Valor y puntos que corresponden a un código según la opción NIC
pub fn apply_policy(code: &InfractionCode, pay_double: bool) -> (Decimal, u32) {
    if pay_double {
        (code.default_value * Decimal::TWO, 0)
    } else {
        (code.default_value, code.default_points)
    }
}

/// Motor de cálculo sobre una instantánea del catálogo
pub struct FineComputation<'a> {
    catalog: &'a [InfractionCode],
}

impl<'a> FineComputation<'a> {
    pub fn new(catalog: &'a [InfractionCode]) -> Self {
        Self { catalog }
    }

    /// Búsqueda exacta en el catálogo
    pub fn find(&self, code: &str) -> Option<&'a InfractionCode> {
        self.catalog.iter().find(|c| c.code == code)
    }

    /// Deriva descripción, valor y puntos a partir del código actual
    pub fn derive(&self, fine: &mut Fine) -> Derivation {
        let Some(matched) = self.find(&fine.code) else {
            debug!("🔎 Código {} sin correspondencia en el catálogo", fine.code);
            return Derivation::Unmatched;
        };

        let (value, points) = apply_policy(matched, fine.pay_double);
        fine.description = matched.description.clone();
        fine.value = value;
        fine.points = points;
        Derivation::Matched
    }

    /// El código de la multa cambió
    pub fn on_code_changed(&self, fine: &mut Fine, new_code: &str) -> Derivation {
        fine.code = new_code.to_string();

        if new_code.trim().is_empty() {
            fine.description.clear();
            fine.value = Decimal::ZERO;
            fine.points = 0;
            return Derivation::Cleared;
        }

        if new_code.chars().count() < MIN_LOOKUP_CODE_LEN {
            return Derivation::Skipped;
        }

        self.derive(fine)
    }

    /// La opción "pagar dobrado" cambió
    pub fn on_pay_double_toggled(&self, fine: &mut Fine, pay_double: bool) -> Derivation {
        fine.pay_double = pay_double;

        if fine.code.is_empty() {
            return Derivation::Skipped;
        }

        self.derive(fine)
    }
}
