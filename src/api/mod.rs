// 🌐 HTTP API - axum router over the lookup service
//
// Routes:
//   GET    /health
//   GET    /v1/swift-codes/:swift_code
//   GET    /v1/swift-codes/country/:country_iso2
//   POST   /v1/swift-codes
//   DELETE /v1/swift-codes/:swift_code

mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};

use axum::{
    routing::{get, post},
    Router,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Exclusive access to the connection for one request
    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::internal("database connection lock poisoned"))
    }
}

/// Build the full router with tracing and CORS layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/v1/swift-codes", post(handlers::add_swift_code))
        .route(
            "/v1/swift-codes/:swift_code",
            get(handlers::get_swift_code).delete(handlers::delete_swift_code),
        )
        .route(
            "/v1/swift-codes/country/:country_iso2",
            get(handlers::get_country_swift_codes),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
