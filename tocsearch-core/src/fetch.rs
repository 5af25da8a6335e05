//! Document fetchers.

use crate::models::Resource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// Source of raw markdown
///
/// Implementations must report a missing resource as
/// [`Resource::NotFound`] rather than failing.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, path: &str) -> Resource;
}

/// Reads documents from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FsFetcher {
    base: Option<PathBuf>,
}

impl FsFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve fetch paths relative to `base` instead of the working directory
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }
}

#[async_trait]
impl Fetcher for FsFetcher {
    async fn get(&self, path: &str) -> Resource {
        let full = match &self.base {
            Some(base) => base.join(path),
            None => PathBuf::from(path),
        };

        match tokio::fs::read_to_string(&full).await {
            Ok(contents) => Resource::Found { contents },
            Err(err) => {
                tracing::debug!(path = %full.display(), error = %err, "document not found");
                Resource::NotFound
            }
        }
    }
}

/// Serves documents from memory
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    documents: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.documents.insert(path.into(), contents.into());
    }

    pub fn with(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn get(&self, path: &str) -> Resource {
        match self.documents.get(path) {
            Some(contents) => Resource::found(contents.clone()),
            None => Resource::NotFound,
        }
    }
}
