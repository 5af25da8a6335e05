//! CLI command implementations.

pub mod index;
pub mod interactive;
pub mod search;
pub mod toc;

pub use index::print_index;
pub use interactive::interactive;
pub use search::{search_docs, SearchOptions};
pub use toc::print_toc;

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tocsearch_core::{Config, DocsLocation, FsFetcher, IndexBuilder, PathList, SearchResult};

/// Results shown per query unless `--limit` says otherwise
pub const DEFAULT_LIMIT: usize = 9;

const DEFAULT_CONFIG: &str = "tocsearch.yml";

/// Flags that override the index source from the config file
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory holding the markdown sources
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Pages to index (comma separated)
    #[arg(long)]
    pub paths: Option<String>,

    /// Page whose links list the pages to index
    #[arg(long)]
    pub summary: Option<String>,

    /// Drop headings shallower than this depth
    #[arg(long)]
    pub min_depth: Option<u8>,

    /// Leave headings deeper than this out of the table of contents
    #[arg(long)]
    pub max_depth: Option<u8>,
}

/// Load the config file and apply command-line overrides
///
/// An explicit `--config` must exist; the default `tocsearch.yml` is
/// optional.
pub fn load_config(config_path: Option<&Path>, source: &SourceArgs) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Config::from_file(DEFAULT_CONFIG).context("Failed to load configuration")?
        }
        None => {
            tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG);
            Config::default()
        }
    };

    if let Some(root) = &source.root {
        let cwd = std::env::current_dir().context("Failed to read working directory")?;
        config.root = cwd.join(root);
    }
    if let Some(summary) = &source.summary {
        // Configured paths would otherwise shadow the summary
        config.summary = Some(summary.clone());
        config.paths = None;
    }
    if let Some(paths) = &source.paths {
        config.paths = Some(PathList::parse(paths));
    }
    if let Some(min_depth) = source.min_depth {
        config.min_depth = min_depth;
    }
    if let Some(max_depth) = source.max_depth {
        config.max_depth = max_depth;
    }
    config.validate()?;

    Ok(config)
}

/// Index builder reading markdown from the configured docs root
pub fn builder_for(config: &Config) -> IndexBuilder {
    let root = config.root_dir();
    tracing::debug!("Reading documents from {:?}", root);
    IndexBuilder::new(
        Arc::new(FsFetcher::new()),
        Arc::new(DocsLocation::new(root.to_string_lossy())),
        config.toc_settings(),
    )
}

pub(crate) fn print_result(result: &SearchResult) {
    println!("{}", result.name);
    println!("  {}", result.url);
    println!("  {}", result.content);
    println!();
}
