//! Controladores
//!
//! Puente entre la línea de comandos y los servicios. Cada operación exige
//! una sesión abierta (salvo las de sesión) y devuelve el texto a mostrar.

pub mod auth_controller;
pub mod code_controller;
pub mod driver_controller;
pub mod fine_controller;
pub mod import_controller;
pub mod vehicle_controller;
