//! Backend Redis del record store
//!
//! Cada colección es un string bajo `fleet_compliance:<clave>`. Sin TTL: los
//! registros son durables mientras Redis persista sus datos.

use std::sync::Mutex;

use redis::{Commands, Connection};
use tracing::{debug, info};

use super::backend::KeyValueBackend;
use crate::utils::errors::{storage_error, AppResult};

const KEY_PREFIX: &str = "fleet_compliance";

pub struct RedisBackend {
    connection: Mutex<Connection>,
}

impl RedisBackend {
    /// Conectar a Redis y verificar con PING
    pub fn connect(redis_url: &str) -> AppResult<Self> {
        info!("🔗 Conectando a Redis: {}", mask_redis_url(redis_url));

        let client = redis::Client::open(redis_url)?;
        let mut connection = client.get_connection()?;
        let _: String = redis::cmd("PING").query(&mut connection)?;

        info!("✅ Redis conectado exitosamente");
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn make_key(key: &str) -> String {
        format!("{}:{}", KEY_PREFIX, key)
    }
}

impl KeyValueBackend for RedisBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self
            .connection
            .lock()
            .map_err(|_| storage_error("redis connection lock poisoned"))?;
        let value: Option<String> = conn.get(Self::make_key(key))?;
        debug!("📥 Redis GET {} ({})", key, if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self
            .connection
            .lock()
            .map_err(|_| storage_error("redis connection lock poisoned"))?;
        let _: () = conn.set(Self::make_key(key), value)?;
        debug!("💾 Redis SET {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut conn = self
            .connection
            .lock()
            .map_err(|_| storage_error("redis connection lock poisoned"))?;
        let removed: i64 = conn.del(Self::make_key(key))?;
        debug!("🗑️ Redis DEL {} (eliminados: {})", key, removed);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

/// Enmascara las credenciales de la URL para los logs
pub fn mask_redis_url(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };
    let protocol_end = url.find("://").map(|pos| pos + 3).unwrap_or(0);
    if protocol_end > at_pos {
        return url.to_string();
    }
    format!("{}***:***@{}", &url[..protocol_end], &url[at_pos + 1..])
}
