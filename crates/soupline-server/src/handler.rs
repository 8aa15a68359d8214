use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use soupline_sdk::{DashboardStats, Donation};

use crate::auth::UserProfile;
use crate::error::ServerResult;
use crate::resource::parse_id;
use crate::state::AppState;

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "soupline-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn stats_handler(State(state): State<AppState>) -> ServerResult<Json<DashboardStats>> {
    let stats = state.read()?.stats();
    Ok(Json(stats))
}

/// Donations attributed to one donor, in insertion order.
pub async fn donor_history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Vec<Donation>>> {
    let id = parse_id(&id)?;
    let kitchen = state.read()?;
    let history = kitchen.donor_history(&id)?;
    Ok(Json(history.into_iter().cloned().collect()))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}

pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ServerResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let session = state.auth.login(&request.email, &request.password).await?;
    Ok(Json(LoginResponse {
        message: "login successful".into(),
        token: session.token,
        user: session.user,
    }))
}
