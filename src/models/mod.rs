//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que se persisten en el
//! record store, uno por colección, con sus requests de creación.

pub mod driver;
pub mod fine;
pub mod infraction_code;
pub mod user;
pub mod vehicle;

pub use driver::{CreateDriverRequest, Driver};
pub use fine::{Attachment, CreateFineRequest, DriverRef, Fine, PaymentStatus};
pub use infraction_code::{CreateInfractionCodeRequest, InfractionCode};
pub use user::{RegisterUserRequest, User};
pub use vehicle::{CreateVehicleRequest, Vehicle};
