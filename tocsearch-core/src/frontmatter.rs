//! Front matter decoding for markdown metadata blocks.

use crate::models::Frontmatter;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Decode the YAML inside a front matter block
///
/// An empty block yields default front matter.
///
/// # Example
///
/// ```
/// use tocsearch_core::frontmatter::parse_frontmatter;
///
/// let fm = parse_frontmatter("title: My Post\nauthor: someone").unwrap();
/// assert_eq!(fm.title.as_deref(), Some("My Post"));
/// assert_eq!(fm.extra.len(), 1);
/// ```
pub fn parse_frontmatter(yaml: &str) -> Result<Frontmatter, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    Ok(serde_yaml::from_str(yaml)?)
}
