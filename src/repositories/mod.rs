//! Repositorios
//!
//! Un repositorio tipado por colección sobre el `RecordStore`: lectura
//! completa, búsquedas por id y por clave natural, creación y (salvo
//! catálogo y usuarios) actualización en su lugar.

pub mod driver_repository;
pub mod fine_repository;
pub mod infraction_code_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use driver_repository::DriverRepository;
pub use fine_repository::FineRepository;
pub use infraction_code_repository::InfractionCodeRepository;
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;
