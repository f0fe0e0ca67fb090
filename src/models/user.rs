//! Modelo de User
//!
//! Usuarios del sistema y el request de registro. La contraseña se guarda y
//! se compara en texto plano: esto NO es autenticación de nivel producción,
//! se conserva por compatibilidad con los datos existentes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::database::record_store::Record;

/// User - colección `fg_users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl Record for User {
    const COLLECTION: &'static str = "fg_users";
    const ENTITY: &'static str = "User";
    const KEY_FIELD: &'static str = "username";

    fn id(&self) -> Uuid {
        self.id
    }

    fn natural_key(&self) -> &str {
        &self.username
    }
}

/// Request para registrar un nuevo usuario
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub username: String,

    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub password: String,

    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub name: String,
}

impl From<RegisterUserRequest> for User {
    fn from(request: RegisterUserRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: request.username,
            password: request.password,
            name: request.name,
        }
    }
}

impl User {
    /// Comparación exacta de credenciales
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}
