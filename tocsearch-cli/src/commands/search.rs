//! Search command implementation.

use super::index::build_index;
use super::{load_config, print_result, SourceArgs};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tocsearch_core::{SearchResult, TocSearch};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub limit: usize,
    pub json: bool,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    total: usize,
    results: &'a [SearchResult],
}

/// Build the index and print the results of one query
pub async fn search_docs(
    config_path: Option<&Path>,
    source: &SourceArgs,
    query: &str,
    opts: SearchOptions,
) -> Result<()> {
    let config = load_config(config_path, source)?;
    let state = TocSearch::with_highlight(config.highlight.clone());

    if build_index(&state, &config).await.is_none() {
        eprintln!("No paths or summary configured; search is inactive.");
        return Ok(());
    }

    let Some(results) = state.search(query) else {
        eprintln!("Empty query.");
        return Ok(());
    };
    let shown = &results[..results.len().min(opts.limit)];

    if opts.json {
        let output = SearchOutput {
            query,
            total: results.len(),
            results: shown,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    println!("Found {} results for '{}':\n", results.len(), query);
    for result in shown {
        print_result(result);
    }
    if results.len() > opts.limit {
        println!("... and {} more results", results.len() - opts.limit);
    }

    Ok(())
}
