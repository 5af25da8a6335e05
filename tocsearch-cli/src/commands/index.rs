//! Index command implementation.

use super::{builder_for, load_config, SourceArgs};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tocsearch_core::{SearchIndex, TocSearch};

/// Build the index and print every link record
pub async fn print_index(config_path: Option<&Path>, source: &SourceArgs, json: bool) -> Result<()> {
    let config = load_config(config_path, source)?;
    let state = TocSearch::with_highlight(config.highlight.clone());

    let Some(index) = build_index(&state, &config).await else {
        eprintln!("No paths or summary configured; nothing to index.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(index.records())?);
        return Ok(());
    }

    for record in index.records() {
        let marker = match record.depth {
            Some(depth) => format!("h{}", depth),
            None => "link".to_string(),
        };
        println!("[{}] {} → {}", marker, record.name, record.content);
        println!("  {}", record.url);
    }
    println!("\n{} records", index.len());

    Ok(())
}

/// Rebuild `state` from the configured source and return the new index
pub(crate) async fn build_index(
    state: &TocSearch,
    config: &tocsearch_core::Config,
) -> Option<Arc<SearchIndex>> {
    let builder = builder_for(config);
    state.rebuild(&builder, &config.source()).await;
    state.search_index()
}
