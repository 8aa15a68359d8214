use std::sync::Arc;

use tokio::net::TcpListener;

use soupline_sdk::{FileBackend, Kitchen};

use crate::auth::JwtAuth;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, cors_layer};
use crate::state::AppState;

/// Soupline dashboard server.
pub struct SouplineServer {
    config: ServerConfig,
    state: AppState,
}

impl SouplineServer {
    /// Validate the config and open the kitchen it points at.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let kitchen = match &config.data_dir {
            Some(dir) => {
                let backend = FileBackend::open(dir)?;
                Kitchen::open(backend)?
            }
            None => {
                tracing::warn!("no data_dir configured, records will not survive a restart");
                Kitchen::in_memory()
            }
        };
        Ok(Self::with_kitchen(config, kitchen))
    }

    pub fn with_kitchen(config: ServerConfig, kitchen: Kitchen) -> Self {
        let auth = JwtAuth::new(
            config.jwt_secret.clone(),
            config.token_ttl_secs,
            config.users.clone(),
        );
        let state = AppState::new(kitchen, Arc::new(auth), config.require_auth);
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let router = build_router(self.state.clone());
        if self.config.allowed_origins.is_empty() {
            router
        } else {
            router.layer(cors_layer(&self.config.allowed_origins))
        }
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            require_auth = self.config.require_auth,
            "Soupline server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
