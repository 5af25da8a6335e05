//! Interactive search: one query per stdin line against a single build.

use super::index::build_index;
use super::{load_config, print_result, SourceArgs};
use anyhow::{Context, Result};
use std::path::Path;
use tocsearch_core::TocSearch;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn interactive(config_path: Option<&Path>, source: &SourceArgs, limit: usize) -> Result<()> {
    let config = load_config(config_path, source)?;
    let state = TocSearch::with_highlight(config.highlight.clone());

    match build_index(&state, &config).await {
        Some(index) => eprintln!("Indexed {} records. Type a query, blank line clears.", index.len()),
        None => eprintln!("No paths or summary configured; search is inactive."),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read query")? {
        match state.search(&line) {
            None => println!("(no active search)"),
            Some(results) if results.is_empty() => println!("No results for '{}'", line.trim()),
            Some(results) => {
                for result in results.iter().take(limit) {
                    print_result(result);
                }
            }
        }
    }

    Ok(())
}
