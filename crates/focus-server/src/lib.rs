//! # focus-server
//!
//! HTTP front end for the focus-window resolver.
//!
//! Endpoints:
//! - `GET /health` — liveness
//! - `GET /api/focus/suggest?duration=<minutes>` — best focus window today or
//!   tomorrow for the configured user
//!
//! Events come from the configured [`EventStore`]: a PostgREST table (e.g.
//! Supabase) or a local JSON file.

pub mod config;
pub mod error;
pub mod handlers;
pub mod store;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use focus_engine::{DurationBounds, EventStore, FocusWindowResolver};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
pub use handlers::*;

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: FocusWindowResolver,
    pub bounds: DurationBounds,
    pub store: Arc<dyn EventStore>,
    clock: Clock,
}

impl AppState {
    pub fn new(
        resolver: FocusWindowResolver,
        bounds: DurationBounds,
        store: Arc<dyn EventStore>,
    ) -> Self {
        Self {
            resolver,
            bounds,
            store,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the system clock, e.g. with a fixed instant in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

/// Build the router with all endpoints.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/focus/suggest", get(suggest_focus))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.enable_cors {
        router.layer(cors_layer(&config.cors_origins))
    } else {
        router
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(allowed))
}

/// Bind and serve until Ctrl-C.
pub async fn start_server(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let addr = config.bind_addr();
    let app = build_router(state, config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutting down");
}
