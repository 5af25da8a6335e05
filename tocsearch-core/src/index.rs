//! Index building - fetches documents, runs the pipeline and assembles
//! link records in path order.

use crate::fetch::Fetcher;
use crate::location::LocationResolver;
use crate::models::{Document, LinkRecord};
use crate::pipeline::{Pipeline, ProcessedDocument, TocSettings};
use crate::search::SearchIndex;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Canonical list of logical page paths
///
/// Accepts either a comma-separated string or a list when deserialized;
/// entries are trimmed and empty entries dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPathList", into = "Vec<String>")]
pub struct PathList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPathList {
    Joined(String),
    List(Vec<String>),
}

impl From<RawPathList> for PathList {
    fn from(raw: RawPathList) -> Self {
        match raw {
            RawPathList::Joined(joined) => PathList::parse(&joined),
            RawPathList::List(list) => PathList::from(list),
        }
    }
}

impl PathList {
    /// Split a comma-separated list of paths
    pub fn parse(joined: &str) -> Self {
        Self::from_iter(joined.split(','))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PathList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        PathList(
            iter.into_iter()
                .map(|path| path.as_ref().trim().to_string())
                .filter(|path| !path.is_empty())
                .collect(),
        )
    }
}

impl From<Vec<String>> for PathList {
    fn from(list: Vec<String>) -> Self {
        list.into_iter().collect()
    }
}

impl From<PathList> for Vec<String> {
    fn from(list: PathList) -> Self {
        list.0
    }
}

/// Where the set of pages to index comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// Explicit page paths
    Paths(PathList),
    /// A summary page whose links enumerate the pages
    Summary(String),
    /// Nothing configured; search stays inactive
    None,
}

impl IndexSource {
    /// Explicit paths win over a summary; empty values count as absent
    pub fn from_parts(paths: Option<PathList>, summary: Option<String>) -> Self {
        match (paths, summary) {
            (Some(paths), _) if !paths.is_empty() => IndexSource::Paths(paths),
            (_, Some(summary)) if !summary.trim().is_empty() => {
                IndexSource::Summary(summary.trim().to_string())
            }
            _ => IndexSource::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, IndexSource::None)
    }
}

/// Builds search indexes from logical page paths
///
/// Settings are captured at construction, so a build in flight is not
/// affected by later configuration changes.
#[derive(Clone)]
pub struct IndexBuilder {
    fetcher: Arc<dyn Fetcher>,
    location: Arc<dyn LocationResolver>,
    settings: TocSettings,
}

impl IndexBuilder {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        location: Arc<dyn LocationResolver>,
        settings: TocSettings,
    ) -> Self {
        Self {
            fetcher,
            location,
            settings,
        }
    }

    pub fn settings(&self) -> TocSettings {
        self.settings
    }

    /// Fetch the markdown behind a logical page path
    pub async fn fetch(&self, page: &str) -> Document {
        let file = self.location.page_to_file(page);
        let raw = self.fetcher.get(&file.full_path()).await;
        Document::new(page, file, raw)
    }

    /// Run the full pipeline over one page
    ///
    /// Returns `None` when the page is missing or its markdown is malformed.
    pub async fn process_page(&self, page: &str) -> Option<ProcessedDocument> {
        let doc = self.fetch(page).await;
        run(&Pipeline::full(self.settings), &doc)
    }

    /// Build an index over `paths`
    ///
    /// Pages are fetched concurrently; records are assembled in input order
    /// regardless of the order fetches complete in.
    pub async fn build(&self, paths: &[String]) -> SearchIndex {
        let pipeline = Pipeline::full(self.settings);
        let documents = join_all(paths.iter().map(|path| self.fetch(path))).await;

        let mut records: Vec<LinkRecord> = Vec::new();
        let mut indexed = 0;
        for doc in &documents {
            if let Some(processed) = run(&pipeline, doc) {
                indexed += 1;
                records.extend(processed.into_records());
            }
        }

        tracing::info!(
            documents = indexed,
            requested = paths.len(),
            records = records.len(),
            "search index built"
        );

        SearchIndex::new(records)
    }

    /// Resolve a summary page into the list of pages it links to
    ///
    /// Link URLs are taken as written, in document order.
    pub async fn resolve_summary(&self, summary: &str) -> Option<Vec<String>> {
        let doc = self.fetch(summary).await;
        let processed = run(&Pipeline::links_only(), &doc)?;
        let paths: Vec<String> = processed
            .into_records()
            .into_iter()
            .map(|record| record.url)
            .collect();

        tracing::debug!(summary, paths = paths.len(), "summary resolved");
        Some(paths)
    }

    /// Build from whatever source is configured; `None` leaves search inactive
    pub async fn build_from(&self, source: &IndexSource) -> Option<SearchIndex> {
        match source {
            IndexSource::Paths(paths) => Some(self.build(paths.as_slice()).await),
            IndexSource::Summary(summary) => {
                let paths = self.resolve_summary(summary).await?;
                Some(self.build(&paths).await)
            }
            IndexSource::None => None,
        }
    }
}

fn run(pipeline: &Pipeline, doc: &Document) -> Option<ProcessedDocument> {
    match pipeline.process(doc) {
        Ok(Some(processed)) => Some(processed),
        Ok(None) => {
            tracing::info!(
                path = %doc.logical_path,
                file = %doc.file.full_path(),
                "document not found, skipping"
            );
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "skipping document");
            None
        }
    }
}
