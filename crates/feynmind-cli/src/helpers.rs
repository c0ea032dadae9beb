//! Shared helper functions used across CLI subcommands.
//!
//! Includes tracing initialization, progress store selection and the
//! status report.

use std::sync::Arc;

use anyhow::{Context, Result};
use feynmind_relay::Settings;
use feynmind_store::{MemoryProgressStore, ProgressStore, RestProgressStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
///
/// `RUST_LOG` overrides the default when set.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ---------------------------------------------------------------------------
// Progress store
// ---------------------------------------------------------------------------

/// Pick the progress backend: Supabase when configured, in-memory otherwise.
pub fn progress_store(settings: &Settings) -> Result<Arc<dyn ProgressStore>> {
    match &settings.supabase {
        Some(supabase) => {
            let store = RestProgressStore::new(supabase.url.as_str(), &supabase.service_role)
                .context("failed to build Supabase progress store")?;
            info!(url = %supabase.url, "progress store: supabase");
            Ok(Arc::new(store))
        }
        None => {
            warn!("SUPABASE_URL not set, progress is kept in memory and lost on restart");
            Ok(Arc::new(MemoryProgressStore::new()))
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Human-readable summary of the resolved settings.  Never includes keys.
pub fn status_lines(settings: &Settings) -> Vec<String> {
    let progress = match &settings.supabase {
        Some(supabase) => format!("supabase ({})", supabase.url),
        None => "memory (SUPABASE_URL not set)".to_owned(),
    };

    vec![
        "  OpenAI API key:   set".to_owned(),
        format!("  Model:            {}", settings.model_name),
        format!("  Upstream:         {}", settings.openai_base_url),
        format!("  Allowed origins:  {}", settings.allowed_origins.join(", ")),
        format!("  Progress store:   {progress}"),
    ]
}
