//! Terminal client for the Space Biology Knowledge Engine.
//!
//! Launches the dashboard when run without a subcommand; subcommands give
//! scriptable access to search, summaries, trends and gap analysis.

mod clipboard;
mod commands;
mod context;
mod tui;

use clap::Parser;
use spacebio_core::Persona;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// spacebio: explore space biology research from the terminal
#[derive(Parser, Debug)]
#[command(name = "spacebio", version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Research backend base URL (including the /api prefix)
    #[arg(long)]
    api_url: Option<String>,

    /// Persona: scientist, investor or architect
    #[arg(short, long)]
    persona: Option<Persona>,

    /// Use the built-in demo backend instead of the network
    #[arg(long)]
    offline: bool,

    /// Workspace directory holding .spacebio/config.toml
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Semantic search over the paper corpus
    Search {
        /// Search text
        query: String,
        /// Only papers from this year
        #[arg(long)]
        year: Option<i32>,
        /// Only papers studying this organism (repeatable)
        #[arg(long = "organism")]
        organisms: Vec<String>,
        /// Only chunks from this section
        #[arg(long)]
        section: Option<String>,
        /// Number of chunks to request
        #[arg(long)]
        top_k: Option<usize>,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Search, then summarize the top results for a persona
    Summarize {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Search, then list papers similar to the top hit
    Similar {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Search, then copy a citation for the top hit
    Cite { query: String },
    /// Search a topic, then ask for the consensus across the results
    Consensus {
        topic: String,
        #[arg(long)]
        json: bool,
    },
    /// Corpus-wide research gap analysis
    Gaps {
        #[arg(long)]
        json: bool,
    },
    /// Research trends across the corpus
    Trends {
        #[arg(long)]
        json: bool,
    },
    /// Available filter values
    Filters {
        #[arg(long)]
        json: bool,
    },
    /// Database statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// List personas and their sample queries
    Personas,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create default configuration file
    Init,
    /// Show current configuration
    Show,
}

fn init_tracing(
    verbose: u8,
    quiet: bool,
    stderr: bool,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    // The dashboard owns the terminal, so it only logs to file.
    let stderr_layer = stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::new(filter))
    });

    let log_dir = spacebio_core::config::project_dirs()
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let (json_layer, guard) = match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(&log_dir, "spacebio.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();
    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.quiet, cli.command.is_some());

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut config =
        spacebio_core::config::load_config(Some(&workspace), cli.config.as_deref(), None)
            .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    // Apply CLI overrides
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(persona) = cli.persona {
        config.ui.default_persona = Some(persona);
    }

    match cli.command {
        Some(Commands::Config { action }) => {
            commands::handle_config(action, &workspace, &config)
        }
        Some(command) => {
            let ctx = context::AppContext::new(config, cli.offline)?;
            commands::handle_command(command, &ctx).await
        }
        None => {
            let ctx = context::AppContext::new(config, cli.offline)?;
            tui::run(ctx).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_with_filters() {
        let cli = Cli::parse_from([
            "spacebio",
            "--persona",
            "investor",
            "search",
            "bone loss",
            "--organism",
            "Mouse",
            "--organism",
            "Rat",
            "--year",
            "2019",
        ]);
        assert_eq!(cli.persona, Some(Persona::Investor));
        match cli.command {
            Some(Commands::Search {
                query,
                organisms,
                year,
                ..
            }) => {
                assert_eq!(query, "bone loss");
                assert_eq!(organisms, ["Mouse", "Rat"]);
                assert_eq!(year, Some(2019));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_command_means_dashboard() {
        let cli = Cli::parse_from(["spacebio", "--offline"]);
        assert!(cli.command.is_none());
        assert!(cli.offline);
    }
}
