//! Servicio de sesión
//!
//! Registro, login y logout contra la colección de usuarios. La sesión
//! actual es un único slot en el store (`fg_session`): vacío en un store
//! nuevo, sobrescrito en cada login y borrado en el logout.
//!
//! ⚠️ Las contraseñas se guardan y comparan en texto plano, sin hash ni
//! reglas de complejidad. Esto no es autenticación de nivel producción.

use tracing::{info, warn};
use validator::Validate;

use crate::database::RecordStore;
use crate::models::{RegisterUserRequest, User};
use crate::repositories::UserRepository;
use crate::utils::errors::{AppError, AppResult};

/// Clave del slot de sesión
pub const SESSION_KEY: &str = "fg_session";

#[derive(Clone)]
pub struct SessionService {
    store: RecordStore,
    users: UserRepository,
}

impl SessionService {
    pub fn new(store: RecordStore) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            store,
        }
    }

    /// Registrar un usuario nuevo; username duplicado se rechaza
    pub fn register(&self, request: RegisterUserRequest) -> AppResult<User> {
        request.validate()?;
        let user = self.users.create(User::from(request))?;
        info!("👤 Usuario {} registrado", user.username);
        Ok(user)
    }

    /// Login por coincidencia exacta de username y contraseña
    pub fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .list()?
            .into_iter()
            .find(|u| u.matches(username, password));

        match user {
            Some(user) => {
                self.store.write_slot(SESSION_KEY, &user)?;
                info!("✅ Sesión iniciada para {}", user.username);
                Ok(user)
            }
            None => {
                warn!("❌ Credenciales inválidas");
                Err(AppError::AuthFailure)
            }
        }
    }

    pub fn logout(&self) -> AppResult<()> {
        self.store.clear_slot(SESSION_KEY)?;
        info!("👋 Sesión cerrada");
        Ok(())
    }

    pub fn current_user(&self) -> AppResult<Option<User>> {
        self.store.read_slot(SESSION_KEY)
    }

    /// Usuario de la sesión actual, o `AuthFailure` si no hay sesión
    pub fn require_session(&self) -> AppResult<User> {
        self.current_user()?.ok_or(AppError::AuthFailure)
    }
}
