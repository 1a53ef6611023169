//! revelro-api - REST API layer for the registration lookup gateway
//!
//! Serves the JSON contract consumed by the vehicle-history page. Handlers
//! only talk to the `VehicleLookup` trait and are provider-agnostic.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use revelro_api::{create_router, AppState};
//!
//! let state = AppState::new(Arc::new(backend));
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the gateway router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health))
        // Vehicle history lookup
        .route(
            "/api/vehicle-history",
            post(handlers::vehicle_history::lookup_vehicle_history),
        )
        // Provider credentials diagnostic
        .route(
            "/api/test-credentials",
            get(handlers::credentials::test_credentials),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
