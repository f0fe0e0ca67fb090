//! Guardia de unicidad
//!
//! Cada colección tiene una clave natural (CPF, placa, código, auto de
//! infracción, username). La comparación es literal: no se normalizan
//! mayúsculas ni puntuación, así que "123.456.789-00" y "12345678900" son
//! claves distintas.

use super::record_store::Record;
use crate::utils::errors::{conflict_error, AppResult};

/// Resultado de la verificación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

/// Rechaza si algún elemento existente tiene la misma clave que el candidato
pub fn check<T, K, F>(candidate: &T, existing: &[T], key_of: F) -> Verdict
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let candidate_key = key_of(candidate);
    if existing.iter().any(|item| key_of(item) == candidate_key) {
        Verdict::Reject
    } else {
        Verdict::Accept
    }
}

/// Aplica `check` con la clave natural del registro
pub fn ensure_unique<T: Record>(candidate: &T, existing: &[T]) -> AppResult<()> {
    match check(candidate, existing, |item: &T| item.natural_key().to_string()) {
        Verdict::Accept => Ok(()),
        Verdict::Reject => Err(conflict_error(
            T::ENTITY,
            T::KEY_FIELD,
            candidate.natural_key(),
        )),
    }
}
