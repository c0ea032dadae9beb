//! Main web server setup and startup.
//!
//! [`WebServer`] composes the Axum router, registers all routes, applies
//! the CORS policy and starts the HTTP listener.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use feynmind_relay::TutorRelay;
use feynmind_store::ProgressStore;

use crate::WebConfig;
use crate::api;
use crate::state::AppState;

/// The FeynMind web server.
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// # Arguments
    ///
    /// * `config` - Bind address, port and CORS origins.
    /// * `relay` - The quiz/tutor pipeline shared across all requests.
    /// * `progress` - Where study progress is recorded.
    pub fn new(
        config: WebConfig,
        relay: Arc<TutorRelay>,
        progress: Arc<dyn ProgressStore>,
    ) -> Self {
        let state = Arc::new(AppState { relay, progress });
        Self { config, state }
    }

    /// Return the `host:port` string this server will bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.bind_addr, self.config.port)
    }

    /// Build the Axum router with all routes registered.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/health", get(api::health))
            .route("/api/quiz", post(api::quiz))
            .route("/api/chat", post(api::chat))
            .route("/api/minutes", post(api::save_minutes))
            .route("/api/attempt", post(api::save_attempt))
            .layer(cors_layer(&self.config.allowed_origins))
            .with_state(Arc::clone(&self.state))
    }

    /// Start the server and block until it is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot be bound.
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr();
        let router = self.router();

        tracing::info!(
            addr = %addr,
            origins = ?self.config.allowed_origins,
            progress = self.state.progress.backend(),
            "starting web server"
        );

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

/// Credentialed CORS for the configured origins.  Methods and headers are
/// mirrored from the preflight, which is how "any" is expressed when
/// credentials are allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
