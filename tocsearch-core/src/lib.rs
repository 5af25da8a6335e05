//! # tocsearch-core
//!
//! Core library for tocsearch, a linked table-of-contents search index over
//! markdown documents.
//!
//! This crate provides the markdown tree and its transform pipeline, the
//! index builder that turns a list of pages into link records, and the
//! search engine that queries those records.

pub mod config;
pub mod fetch;
pub mod frontmatter;
pub mod index;
pub mod location;
pub mod markdown;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod slug;
pub mod state;

pub use config::{Config, ConfigError};
pub use fetch::{Fetcher, FsFetcher, MemoryFetcher};
pub use index::{IndexBuilder, IndexSource, PathList};
pub use location::{DocsLocation, LocationResolver};
pub use markdown::{to_markdown, MarkdownParser, Node};
pub use models::{Document, Frontmatter, LinkRecord, Resource, SearchResult, VirtualFile};
pub use pipeline::{Pipeline, PipelineError, ProcessedDocument, TocSettings};
pub use search::{Highlight, SearchIndex};
pub use slug::{slugify, Slugger};
pub use state::{BuildTicket, TocSearch};
