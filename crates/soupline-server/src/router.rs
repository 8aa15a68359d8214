use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use soupline_sdk::{Donation, Donor, Employee, InventoryItem};

use crate::auth::require_bearer;
use crate::handler;
use crate::resource::{create_record, delete_record, get_record, list_records, update_record};
use crate::state::AppState;

/// Build the axum router with every Soupline endpoint.
///
/// `/health`, `/info` and `/api/login` are open. Everything else under
/// `/api` passes through the bearer-token middleware.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/donors", get(list_records::<Donor>).post(create_record::<Donor>))
        .route(
            "/api/donors/:id",
            get(get_record::<Donor>)
                .put(update_record::<Donor>)
                .delete(delete_record::<Donor>),
        )
        .route("/api/donors/:id/donations", get(handler::donor_history_handler))
        .route(
            "/api/donations",
            get(list_records::<Donation>).post(create_record::<Donation>),
        )
        .route(
            "/api/donations/:id",
            get(get_record::<Donation>)
                .put(update_record::<Donation>)
                .delete(delete_record::<Donation>),
        )
        .route(
            "/api/inventory",
            get(list_records::<InventoryItem>).post(create_record::<InventoryItem>),
        )
        .route(
            "/api/inventory/:id",
            get(get_record::<InventoryItem>)
                .put(update_record::<InventoryItem>)
                .delete(delete_record::<InventoryItem>),
        )
        .route(
            "/api/employees",
            get(list_records::<Employee>).post(create_record::<Employee>),
        )
        .route(
            "/api/employees/:id",
            get(get_record::<Employee>)
                .put(update_record::<Employee>)
                .delete(delete_record::<Employee>),
        )
        .route("/api/stats", get(handler::stats_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .route("/api/login", post(handler::login_handler))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins. Unparseable origins are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}
