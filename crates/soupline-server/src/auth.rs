use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::UserAccount;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// The caller behind an accepted bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

#[derive(Clone, Debug)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| Self::Bearer(token.trim().to_string()))
            .unwrap_or(Self::Anonymous)
    }
}

/// Public view of a user account, returned from login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&UserAccount> for UserProfile {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange email and password for a signed session token.
    async fn login(&self, email: &str, password: &str) -> ServerResult<Session>;
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Token lifetimes are capped at one year.
const MAX_TTL_SECS: u64 = 366 * 24 * 60 * 60;

/// Checks passwords against configured Argon2 hashes and issues HS256 tokens.
pub struct JwtAuth {
    secret: String,
    ttl_secs: i64,
    accounts: Vec<UserAccount>,
}

impl JwtAuth {
    pub fn new(secret: impl Into<String>, ttl_secs: u64, accounts: Vec<UserAccount>) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs: ttl_secs.min(MAX_TTL_SECS) as i64,
            accounts,
        }
    }

    pub fn issue(&self, account: &UserAccount) -> ServerResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account.id.clone(),
            email: account.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ServerError::Internal(format!("token signing failed: {e}")))
    }

    pub fn verify(&self, token: &str) -> ServerResult<Identity> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| ServerError::AuthFailed(e.to_string()))?;
        Ok(Identity {
            user_id: data.claims.sub,
            email: data.claims.email,
        })
    }

    fn account(&self, email: &str) -> Option<&UserAccount> {
        self.accounts.iter().find(|a| a.email.eq_ignore_ascii_case(email))
    }
}

#[async_trait]
impl AuthProvider for JwtAuth {
    async fn login(&self, email: &str, password: &str) -> ServerResult<Session> {
        let Some(account) = self.account(email) else {
            tracing::warn!(email, "login for unknown account");
            return Err(ServerError::InvalidCredentials);
        };
        if !verify_password(password, &account.password_hash) {
            tracing::warn!(email, "login with wrong password");
            return Err(ServerError::InvalidCredentials);
        }
        let token = self.issue(account)?;
        tracing::info!(user = %account.id, "login succeeded");
        Ok(Session {
            token,
            user: UserProfile::from(account),
        })
    }

    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) => self.verify(token),
            Credentials::Anonymous => Err(ServerError::AuthFailed("missing bearer token".into())),
        }
    }
}

/// Hash a password into an Argon2 PHC string with a random salt.
pub fn hash_password(password: &str) -> ServerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServerError::Internal(format!("password hashing failed: {e}")))
}

/// A malformed stored hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is malformed");
            false
        }
    }
}

/// Middleware guarding the `/api` routes behind a bearer token.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if state.require_auth {
        let credentials = Credentials::from_headers(request.headers());
        let identity = state.auth.authenticate(&credentials).await?;
        request.extensions_mut().insert(identity);
    }
    Ok(next.run(request).await)
}
