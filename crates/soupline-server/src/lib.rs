//! HTTP server for the Soupline kitchen dashboard.
//!
//! Exposes donors, donations, inventory and employees as JSON REST
//! collections over a shared [`soupline_sdk::Kitchen`], plus dashboard
//! statistics and password login issuing bearer tokens.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod resource;
pub mod router;
pub mod server;
pub mod state;

pub use auth::{
    hash_password, verify_password, AuthProvider, Credentials, Identity, JwtAuth, Session,
    UserProfile,
};
pub use config::{ServerConfig, UserAccount};
pub use error::{ServerError, ServerResult};
pub use server::SouplineServer;
pub use state::AppState;
