//! Módulo de almacenamiento
//!
//! Backends clave-valor (memoria, archivos JSON, Redis), el record store
//! genérico por colección y la guardia de unicidad.

pub mod backend;
pub mod record_store;
pub mod redis_backend;
pub mod uniqueness;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use record_store::{Record, RecordStore};
pub use redis_backend::RedisBackend;
