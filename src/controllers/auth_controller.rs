//! Controlador de sesión
//!
//! Registro, login, logout y "quién soy". Es el único controlador que no
//! exige una sesión abierta.

use crate::models::RegisterUserRequest;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn register(state: &AppState, request: RegisterUserRequest) -> AppResult<String> {
    let user = state.sessions().register(request)?;
    Ok(format!("User {} registered. You can now log in.", user.username))
}

pub fn login(state: &AppState, username: &str, password: &str) -> AppResult<String> {
    let user = state.sessions().login(username, password)?;
    Ok(format!("Welcome, {}!", user.name))
}

pub fn logout(state: &AppState) -> AppResult<String> {
    state.sessions().logout()?;
    Ok("Logged out.".to_string())
}

pub fn whoami(state: &AppState) -> AppResult<String> {
    Ok(match state.sessions().current_user()? {
        Some(user) => format!("{} ({})", user.name, user.username),
        None => "Not logged in.".to_string(),
    })
}
