//! # tocsearch CLI
//!
//! Command-line interface for building and querying a markdown
//! table-of-contents search index.

mod commands;

use clap::{Parser, Subcommand};
use commands::SourceArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tocsearch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to tocsearch.yml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and print its link records
    Index {
        #[command(flatten)]
        source: SourceArgs,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build the index and run a single query
    Search {
        /// Search query
        query: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Maximum results to print
        #[arg(long, default_value_t = commands::DEFAULT_LIMIT)]
        limit: usize,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build the index once, then read queries line by line from stdin
    Interactive {
        #[command(flatten)]
        source: SourceArgs,

        /// Maximum results to print per query
        #[arg(long, default_value_t = commands::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Print the table of contents of a single page
    Toc {
        /// Logical page path (e.g. guide/install)
        page: String,

        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Index { source, json } => commands::print_index(config, &source, json).await,
        Commands::Search {
            query,
            source,
            limit,
            json,
        } => {
            let opts = commands::SearchOptions { limit, json };
            commands::search_docs(config, &source, &query, opts).await
        }
        Commands::Interactive { source, limit } => {
            commands::interactive(config, &source, limit).await
        }
        Commands::Toc { page, source } => commands::print_toc(config, &source, &page).await,
    }
}
