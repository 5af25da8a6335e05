//! In-memory keyword search over harvested link records.

use crate::models::{LinkRecord, SearchResult};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Characters kept on either side of a match
const EXCERPT_LEAD: usize = 20;
/// Excerpt window length, in characters
const EXCERPT_LEN: usize = 40;

/// Markers wrapped around each highlighted match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub open: String,
    pub close: String,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            open: r#"<em class="search-keyword">"#.to_string(),
            close: "</em>".to_string(),
        }
    }
}

/// Ordered link records from every indexed document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchIndex {
    records: Vec<LinkRecord>,
}

impl SearchIndex {
    pub fn new(records: Vec<LinkRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Search with the default highlight markers
    pub fn search(&self, query: &str) -> Option<Vec<SearchResult>> {
        self.search_with(query, &Highlight::default())
    }

    /// Match `query` literally and case-insensitively against record content
    ///
    /// Returns `None` for an empty or whitespace-only query (no active
    /// search), otherwise the matching records in index order, each with a
    /// highlighted excerpt.
    pub fn search_with(&self, query: &str, highlight: &Highlight) -> Option<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return None;
        }

        let pattern = match literal_pattern(query) {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::warn!(error = %err, "query could not be compiled");
                return Some(Vec::new());
            }
        };

        let results = self
            .records
            .iter()
            .filter_map(|record| {
                excerpt(&record.content, &pattern, highlight)
                    .map(|content| SearchResult::from_record(record, content))
            })
            .collect();

        Some(results)
    }
}

impl From<Vec<LinkRecord>> for SearchIndex {
    fn from(records: Vec<LinkRecord>) -> Self {
        Self::new(records)
    }
}

fn literal_pattern(query: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
}

/// Highlighted window around the first match, or `None` without a match
///
/// The window starts 20 characters before the match (clamped at the start
/// of the content) and spans 40 characters. Only occurrences that fall
/// entirely inside the window are highlighted.
fn excerpt(content: &str, pattern: &Regex, highlight: &Highlight) -> Option<String> {
    let found = pattern.find(content)?;
    let match_index = content[..found.start()].chars().count();
    let start = match_index.saturating_sub(EXCERPT_LEAD);

    let window: String = content.chars().skip(start).take(EXCERPT_LEN).collect();
    let highlighted = pattern.replace_all(&window, |caps: &regex::Captures<'_>| {
        format!("{}{}{}", highlight.open, &caps[0], highlight.close)
    });
    Some(highlighted.into_owned())
}
