//! Fleet compliance
//!
//! Registro de motoristas, vehículos, códigos de infracción y multas de
//! tránsito de una flota, con cálculo de valores y puntos por código,
//! alertas de vencimiento de CNH e importación desde documentos.

pub mod cli;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;
