use uuid::Uuid;

use crate::models::CreateVehicleRequest;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// Campos editables; `None` conserva el valor actual
#[derive(Debug, Default)]
pub struct VehicleChanges {
    pub plate: Option<String>,
    pub renavam: Option<String>,
    pub chassis: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

pub fn add(state: &AppState, request: CreateVehicleRequest) -> AppResult<String> {
    state.sessions().require_session()?;
    let vehicle = state.vehicles().register_vehicle(request)?;
    Ok(format!("Vehicle {} registered ({}).", vehicle.plate, vehicle.id))
}

pub fn update(state: &AppState, id: Uuid, changes: VehicleChanges) -> AppResult<String> {
    state.sessions().require_session()?;
    let service = state.vehicles();
    let Some(mut vehicle) = service.find_vehicle(id)? else {
        return Ok(format!("No vehicle with id {}; nothing changed.", id));
    };

    if let Some(plate) = changes.plate {
        vehicle.plate = plate;
    }
    if let Some(renavam) = changes.renavam {
        vehicle.renavam = renavam;
    }
    if let Some(chassis) = changes.chassis {
        vehicle.chassis = chassis;
    }
    if let Some(brand) = changes.brand {
        vehicle.brand = brand;
    }
    if let Some(model) = changes.model {
        vehicle.model = model;
    }
    if let Some(year) = changes.year {
        vehicle.year = year;
    }

    service.update_vehicle(vehicle.clone())?;
    Ok(format!("Vehicle {} updated.", vehicle.plate))
}

pub fn list(state: &AppState) -> AppResult<String> {
    state.sessions().require_session()?;
    let vehicles = state.vehicles().list_vehicles()?;
    if vehicles.is_empty() {
        return Ok("No vehicles registered.".to_string());
    }

    let mut out = format!(
        "{:<36}  {:<8}  {:<12}  {:<24}  {}\n",
        "ID", "PLATE", "RENAVAM", "VEHICLE", "YEAR"
    );
    for vehicle in vehicles {
        out.push_str(&format!(
            "{:<36}  {:<8}  {:<12}  {:<24}  {}\n",
            vehicle.id,
            vehicle.plate,
            vehicle.renavam,
            vehicle.label(),
            vehicle.year
        ));
    }
    Ok(out)
}
