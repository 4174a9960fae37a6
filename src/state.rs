use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::config::Config;
use crate::store::Store;

/// Everything a handler needs, shared through `web::Data<AppState>`.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub keys: JwtKeys,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, keys: JwtKeys, bcrypt_cost: u32) -> Self {
        Self {
            store,
            keys,
            bcrypt_cost,
        }
    }

    pub fn from_config(store: Arc<dyn Store>, config: &Config) -> Self {
        Self::new(
            store,
            JwtKeys::new(&config.jwt_secret, config.token_ttl_secs),
            config.bcrypt_cost,
        )
    }
}
