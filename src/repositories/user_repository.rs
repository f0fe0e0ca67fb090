use crate::database::RecordStore;
use crate::models::User;
use crate::utils::errors::AppResult;

/// Acceso a la colección de usuarios (sin update ni delete)
#[derive(Clone)]
pub struct UserRepository {
    store: RecordStore,
}

impl UserRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn create(&self, user: User) -> AppResult<User> {
        self.store.insert(user)
    }

    pub fn list(&self) -> AppResult<Vec<User>> {
        self.store.list()
    }
}
