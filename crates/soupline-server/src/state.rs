use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use soupline_sdk::Kitchen;

use crate::auth::AuthProvider;
use crate::error::{ServerError, ServerResult};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub kitchen: Arc<RwLock<Kitchen>>,
    pub auth: Arc<dyn AuthProvider>,
    pub require_auth: bool,
}

impl AppState {
    pub fn new(kitchen: Kitchen, auth: Arc<dyn AuthProvider>, require_auth: bool) -> Self {
        Self {
            kitchen: Arc::new(RwLock::new(kitchen)),
            auth,
            require_auth,
        }
    }

    pub fn read(&self) -> ServerResult<RwLockReadGuard<'_, Kitchen>> {
        self.kitchen
            .read()
            .map_err(|_| ServerError::Internal("kitchen lock poisoned".into()))
    }

    pub fn write(&self) -> ServerResult<RwLockWriteGuard<'_, Kitchen>> {
        self.kitchen
            .write()
            .map_err(|_| ServerError::Internal("kitchen lock poisoned".into()))
    }
}
