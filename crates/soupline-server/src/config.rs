use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding one JSON file per collection. `None` keeps all
    /// records in memory.
    pub data_dir: Option<PathBuf>,
    /// HMAC secret for signing bearer tokens.
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    /// Require a valid bearer token on every `/api` route except login.
    pub require_auth: bool,
    /// Origins allowed by CORS. Empty disables the CORS layer.
    pub allowed_origins: Vec<String>,
    pub users: Vec<UserAccount>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            data_dir: None,
            jwt_secret: String::new(),
            token_ttl_secs: 3600,
            require_auth: true,
            allowed_origins: Vec::new(),
            users: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ServerResult<()> {
        if self.require_auth && self.jwt_secret.len() < 16 {
            return Err(ServerError::Config(
                "jwt_secret must be at least 16 bytes when require_auth is on".into(),
            ));
        }
        if self.token_ttl_secs == 0 {
            return Err(ServerError::Config("token_ttl_secs must be positive".into()));
        }
        Ok(())
    }
}

/// A dashboard login, as configured by the operator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    /// Argon2 PHC string, see `soupline hash-password`.
    pub password_hash: String,
}

fn default_role() -> String {
    "staff".into()
}
