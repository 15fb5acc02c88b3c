//! EaseMyForm site library.
//!
//! Marketing pages, the user and admin dashboards, and the phone login
//! flow, served by axum. The binary in `main.rs` only adds tracing, Sentry
//! and the listener; everything else is assembled by [`app`] so tests can
//! drive the full router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::MemoryStore;

use crate::routes::not_found::not_found;
use crate::state::AppState;

/// Build the application router with a fresh in-memory session store.
pub fn app(state: AppState) -> Router {
    app_with_session_store(state, MemoryStore::default())
}

/// Build the application router over a given session store.
///
/// Layers, outermost first: trace, session, request id, security headers.
pub fn app_with_session_store(state: AppState, store: MemoryStore) -> Router {
    let config = state.config();
    let session_layer = middleware::create_session_layer(store, config);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes(config))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(not_found)
        .layer(axum_middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
