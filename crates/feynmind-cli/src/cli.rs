//! CLI argument definitions for the FeynMind relay.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use clap::{Parser, Subcommand};

/// FeynMind -- quiz and Feynman-tutor relay.
#[derive(Parser)]
#[command(
    name = "feynmind",
    version,
    about = "FeynMind -- quiz and Feynman-tutor relay",
    long_about = "Stateless HTTP relay that turns study requests into Chat Completions \
                  calls and returns schema-checked quizzes and tutor replies."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP relay.
    Serve {
        /// Address to bind the HTTP server to.
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,

        /// Port to listen on.
        #[arg(long, short, default_value_t = 8000)]
        port: u16,
    },

    /// Show the resolved configuration (secrets are never printed).
    Status,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["feynmind", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { bind, port } => {
                assert_eq!(bind, "0.0.0.0");
                assert_eq!(port, 8000);
            }
            Commands::Status => panic!("expected serve"),
        }
    }

    #[test]
    fn serve_overrides() {
        let cli =
            Cli::try_parse_from(["feynmind", "serve", "--bind", "127.0.0.1", "-p", "9000"])
                .unwrap();
        match cli.command {
            Commands::Serve { bind, port } => {
                assert_eq!(bind, "127.0.0.1");
                assert_eq!(port, 9000);
            }
            Commands::Status => panic!("expected serve"),
        }
    }

    #[test]
    fn status_takes_no_arguments() {
        assert!(Cli::try_parse_from(["feynmind", "status"]).is_ok());
        assert!(Cli::try_parse_from(["feynmind", "status", "--port", "1"]).is_err());
    }
}
