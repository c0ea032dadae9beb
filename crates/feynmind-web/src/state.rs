//! Shared application state for the web server.
//!
//! [`AppState`] is wrapped in an `Arc` and shared across all request
//! handlers.  Everything in it is read-only after startup.

use std::sync::Arc;

use feynmind_relay::TutorRelay;
use feynmind_store::ProgressStore;

/// Shared state accessible from every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Quiz and tutoring pipeline.
    pub relay: Arc<TutorRelay>,

    /// Sink for study minutes and quiz attempts.
    pub progress: Arc<dyn ProgressStore>,
}
