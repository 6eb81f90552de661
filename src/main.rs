//! # ticket-index CLI (`tix`)
//!
//! Builds a semantic index over a support ticket export and serves
//! similarity queries against it.
//!
//! ```bash
//! tix --config ./config/tix.toml build
//! tix --config ./config/tix.toml search "device offline" --limit 5
//! ```
//!
//! Diagnostics go to stderr; `search` prints a JSON array of ranked
//! results on stdout.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ticket_index::{build_cmd, config, progress, search};

/// Semantic ticket search — index and query a ticket export with local
/// embeddings.
#[derive(Parser)]
#[command(
    name = "tix",
    about = "Semantic search over support ticket exports",
    version,
    long_about = "ticket-index builds an embedding index over a ticketing system's JSON export \
    (filtering out automated bot comments) and serves top-k similarity queries against it. \
    Results are printed as JSON on stdout; diagnostics go to stderr."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/tix.toml")]
    config: PathBuf,

    /// Diagnostics on stderr: off, human, or json.
    /// Defaults to human when stderr is a terminal, off otherwise.
    #[arg(long, global = true, value_enum)]
    progress: Option<ProgressArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProgressArg {
    Off,
    Human,
    Json,
}

impl ProgressArg {
    fn mode(self) -> progress::Mode {
        match self {
            ProgressArg::Off => progress::Mode::Off,
            ProgressArg::Human => progress::Mode::Human,
            ProgressArg::Json => progress::Mode::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from the corpus.
    ///
    /// Skips the rebuild when the existing artifact is newer than the
    /// corpus file; a changed corpus always triggers a full rebuild.
    Build {
        /// Rebuild even if the index is up to date.
        #[arg(long)]
        force: bool,
    },

    /// Search the index and print ranked results as JSON.
    Search {
        /// The free-text query.
        query: String,

        /// Maximum number of results.
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mode = cli
        .progress
        .map(ProgressArg::mode)
        .unwrap_or_else(progress::Mode::default_for_tty);
    let reporter = mode.reporter();

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Build { force } => {
            build_cmd::run_build(&cfg, force, reporter.as_ref()).await?;
        }
        Commands::Search { query, limit } => {
            search::run_search(&cfg, &query, limit, reporter.as_ref()).await?;
        }
    }

    Ok(())
}
