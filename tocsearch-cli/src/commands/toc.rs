//! Toc command implementation.

use super::{builder_for, load_config, SourceArgs};
use anyhow::{bail, Result};
use std::path::Path;

/// Print a page's table of contents as markdown
pub async fn print_toc(config_path: Option<&Path>, source: &SourceArgs, page: &str) -> Result<()> {
    let config = load_config(config_path, source)?;
    let builder = builder_for(&config);

    let Some(processed) = builder.process_page(page).await else {
        bail!("Page '{}' was not found or could not be parsed", page);
    };

    print!("{}", processed.to_markdown());
    Ok(())
}
