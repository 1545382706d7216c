use std::path::PathBuf;
use std::sync::Arc;

use crate::admin::auth::AdminAuth;
use crate::config::Config;
use crate::store::WrappedStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Backend chosen from `DATABASE_URL` at startup.
    pub store: Arc<dyn WrappedStore>,
    pub admin: AdminAuth,
    /// Root for sample `static_path` lookups.
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn WrappedStore>, config: &Config) -> Self {
        Self {
            store,
            admin: AdminAuth::new(&config.admin_password),
            public_dir: config.public_dir.clone(),
        }
    }
}
