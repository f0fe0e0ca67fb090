//! DTOs
//!
//! Estructuras de intercambio con colaboradores externos.

pub mod import_dto;

pub use import_dto::{DriverCandidate, FineCandidate, InfractionCodeCandidate, VehicleCandidate};
