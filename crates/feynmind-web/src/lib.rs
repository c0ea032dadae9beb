//! HTTP interface for the FeynMind relay.
//!
//! This crate exposes the relay over a small JSON API:
//!
//! - `GET /api/health` -- liveness.
//! - `POST /api/quiz` -- generate a multiple-choice quiz on a topic.
//! - `POST /api/chat` -- one turn of a Feynman-style tutoring conversation.
//! - `POST /api/minutes`, `POST /api/attempt` -- hand study progress to the
//!   configured progress store.

pub mod api;
pub mod error;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::WebServer;
pub use state::AppState;

use feynmind_relay::config::DEFAULT_ALLOWED_ORIGINS;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// The address to bind the HTTP server to.
    pub bind_addr: String,
    /// The port to listen on.
    pub port: u16,
    /// Origins allowed to make credentialed cross-origin requests.
    pub allowed_origins: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".into(),
            port: 8000,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGINS.into()],
        }
    }
}
