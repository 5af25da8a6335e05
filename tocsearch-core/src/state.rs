//! Shared search state.
//!
//! Holds the current index and the results of the last query. Index builds
//! are tagged with a generation number; a build only replaces the index if
//! no newer build has started since, so a slow build can never overwrite
//! the result of a faster, more recent one.

use crate::index::{IndexBuilder, IndexSource};
use crate::models::SearchResult;
use crate::search::{Highlight, SearchIndex};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generation issued to a build when it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BuildTicket(u64);

impl BuildTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct TocSearch {
    index: RwLock<Option<Arc<SearchIndex>>>,
    results: RwLock<Option<Vec<SearchResult>>>,
    generation: AtomicU64,
    highlight: Highlight,
}

impl TocSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_highlight(highlight: Highlight) -> Self {
        Self {
            highlight,
            ..Self::default()
        }
    }

    /// Start a new build, invalidating every earlier ticket
    pub fn begin_build(&self) -> BuildTicket {
        BuildTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Install the result of a build
    ///
    /// Returns `false` and drops `index` when a newer build has started
    /// since `ticket` was issued.
    pub fn commit(&self, ticket: BuildTicket, index: Option<SearchIndex>) -> bool {
        // Lock order is results, then index, everywhere both are held
        let mut results = self.results.write();
        let mut current = self.index.write();
        let latest = self.generation.load(Ordering::SeqCst);
        if ticket.0 != latest {
            tracing::debug!(
                generation = ticket.0,
                latest,
                "discarding stale index build"
            );
            return false;
        }

        *current = index.map(Arc::new);
        // Results refer to the old index
        *results = None;
        true
    }

    /// Build from `source` under a fresh ticket and commit the result
    pub async fn rebuild(&self, builder: &IndexBuilder, source: &IndexSource) -> bool {
        let ticket = self.begin_build();
        tracing::debug!(generation = ticket.0, "index build started");
        let index = builder.build_from(source).await;
        self.commit(ticket, index)
    }

    /// Query the current index and remember the results
    ///
    /// `None` when there is no index or the query is blank.
    pub fn search(&self, query: &str) -> Option<Vec<SearchResult>> {
        // Holding the results lock keeps a concurrent commit from landing
        // between the query and the store
        let mut stored = self.results.write();
        let index = self.search_index();
        let results = index.and_then(|index| index.search_with(query, &self.highlight));
        *stored = results.clone();
        results
    }

    /// Snapshot of the current index
    pub fn search_index(&self) -> Option<Arc<SearchIndex>> {
        self.index.read().clone()
    }

    pub fn search_results(&self) -> Option<Vec<SearchResult>> {
        self.results.read().clone()
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }
}
