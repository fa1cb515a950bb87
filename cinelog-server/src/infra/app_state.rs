use std::{fmt, sync::Arc};

use cinelog_core::database::PostgresDatabase;

use crate::infra::config::Config;
use crate::users::auth::jwt::JwtKeys;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PostgresDatabase>,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtKeys>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(db: Arc<PostgresDatabase>, config: Arc<Config>) -> Self {
        let jwt = Arc::new(JwtKeys::new(config.jwt_secret.as_bytes()));
        Self { db, config, jwt }
    }
}
