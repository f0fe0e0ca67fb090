//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y fechas de calendario.

pub mod dates;
pub mod errors;
pub mod validation;
