//! CLI entry point for the FeynMind relay.
//!
//! This binary provides the `feynmind` command with subcommands for
//! serving the HTTP relay and checking the resolved configuration.

mod cli;
mod helpers;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use feynmind_relay::{LlmClient, Settings, TutorRelay};
use feynmind_web::{WebConfig, WebServer};

use crate::cli::{Cli, Commands};
use crate::helpers::{init_tracing, progress_store, status_lines};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, port } => cmd_serve(bind, port).await,
        Commands::Status => cmd_status(),
    }
}

// ---------------------------------------------------------------------------
// Subcommand: serve
// ---------------------------------------------------------------------------

async fn cmd_serve(bind: String, port: u16) -> Result<()> {
    init_tracing("info");

    info!("starting FeynMind relay");

    let settings = Settings::from_env().context("failed to load configuration")?;
    info!(
        model = %settings.model_name,
        upstream = %settings.openai_base_url,
        "configuration loaded"
    );

    let llm = LlmClient::new(settings.llm_config()).context("failed to create LLM client")?;
    let relay =
        Arc::new(TutorRelay::with_client(llm).context("failed to compile output schemas")?);
    let progress = progress_store(&settings)?;

    let config = WebConfig {
        bind_addr: bind,
        port,
        allowed_origins: settings.allowed_origins.clone(),
    };

    let server = WebServer::new(config, relay, progress);
    info!(addr = %server.addr(), "relay ready");

    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("web server error: {e}"))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: status
// ---------------------------------------------------------------------------

fn cmd_status() -> Result<()> {
    init_tracing("warn");

    println!();
    println!("  FeynMind Status");
    println!("  ===============");
    println!();

    match Settings::from_env() {
        Ok(settings) => {
            for line in status_lines(&settings) {
                println!("{line}");
            }
        }
        Err(e) => println!("  Configuration:    ERROR ({e})"),
    }

    println!();
    Ok(())
}
