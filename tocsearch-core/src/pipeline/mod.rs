//! Document transform pipeline.
//!
//! Flow: raw markdown → parse → transforms → harvested link records
//!
//! Each step takes the tree by value and returns the transformed tree,
//! threading a [`DocumentContext`] for the per-document state (title,
//! headings, harvested records). Step order is fixed:
//!
//! 1. slug assignment
//! 2. title extraction
//! 3. heading depth filtering
//! 4. table-of-contents extraction
//! 5. link/image URL resolution
//! 6. link harvesting
//!
//! [`Pipeline::links_only`] runs steps 1 and 6 only; it is used to turn a
//! summary document into a path list.

pub mod depth;
pub mod harvest;
pub mod slugs;
pub mod title;
pub mod toc;
pub mod urls;

use crate::frontmatter::{parse_frontmatter, FrontmatterError};
use crate::markdown::{to_markdown, MarkdownParser, Node};
use crate::models::{Document, Frontmatter, HeadingRecord, LinkRecord, Resource};
use thiserror::Error;

pub use depth::DepthFilter;
pub use harvest::LinkHarvester;
pub use slugs::SlugTransformer;
pub use title::TitleTransformer;
pub use toc::TocTransformer;
pub use urls::{resolve_url, UrlResolver};

/// Errors that can occur while processing a single document
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The document's front matter could not be decoded
    #[error("Malformed markdown in {path}: {source}")]
    MalformedMarkdown {
        path: String,
        #[source]
        source: FrontmatterError,
    },
}

/// Heading depth bounds for table-of-contents extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocSettings {
    /// Headings shallower than this are removed
    pub min_depth: u8,
    /// Headings deeper than this are left out of the table of contents
    pub max_depth: u8,
}

impl Default for TocSettings {
    fn default() -> Self {
        Self {
            min_depth: 1,
            max_depth: 6,
        }
    }
}

/// Per-document state threaded through the transforms
#[derive(Debug, Clone, Default)]
pub struct DocumentContext {
    /// Logical path the document was requested as
    pub path: String,
    /// Page location relative URLs resolve against
    pub location: String,
    pub matter: Frontmatter,
    /// First depth-1 heading, once extracted
    pub title: Option<String>,
    /// Headings in document order with their assigned slugs
    pub headings: Vec<HeadingRecord>,
    pub records: Vec<LinkRecord>,
}

impl DocumentContext {
    pub fn new(path: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    /// Display name: front matter title, then extracted title, then path
    pub fn name(&self) -> String {
        self.matter
            .title()
            .or(self.title.as_deref())
            .unwrap_or(&self.path)
            .to_string()
    }
}

/// A single tree transform
pub trait Transform: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, tree: Node, ctx: &mut DocumentContext) -> Node;
}

/// Output of running a pipeline over one document
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub tree: Node,
    pub context: DocumentContext,
}

impl ProcessedDocument {
    pub fn records(&self) -> &[LinkRecord] {
        &self.context.records
    }

    pub fn into_records(self) -> Vec<LinkRecord> {
        self.context.records
    }

    /// Render the transformed tree back to markdown
    pub fn to_markdown(&self) -> String {
        to_markdown(&self.tree)
    }
}

/// Ordered list of transforms with immutable settings
pub struct Pipeline {
    parser: MarkdownParser,
    steps: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// Full table-of-contents pipeline used for search indexing
    pub fn full(settings: TocSettings) -> Self {
        Self {
            parser: MarkdownParser::new(),
            steps: vec![
                Box::new(SlugTransformer::new()),
                Box::new(TitleTransformer::new()),
                Box::new(DepthFilter::new(settings.min_depth)),
                Box::new(TocTransformer::new(settings.max_depth)),
                Box::new(UrlResolver::new()),
                Box::new(LinkHarvester::new()),
            ],
        }
    }

    /// Slug and harvest only; resolves a summary into its link targets
    pub fn links_only() -> Self {
        Self {
            parser: MarkdownParser::new(),
            steps: vec![
                Box::new(SlugTransformer::new()),
                Box::new(LinkHarvester::new()),
            ],
        }
    }

    /// Names of the configured steps, in order
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Process a fetched document; `Ok(None)` when it was not found
    pub fn process(&self, doc: &Document) -> Result<Option<ProcessedDocument>, PipelineError> {
        match &doc.raw {
            Resource::Found { contents } => self
                .process_text(&doc.logical_path, &doc.page_location(), contents)
                .map(Some),
            Resource::NotFound => Ok(None),
        }
    }

    /// Parse and transform markdown text
    pub fn process_text(
        &self,
        path: &str,
        location: &str,
        markdown: &str,
    ) -> Result<ProcessedDocument, PipelineError> {
        let tree = self.parser.parse(markdown);
        let mut context = DocumentContext::new(path, location);

        if let Some(yaml) = tree.front_matter() {
            context.matter =
                parse_frontmatter(yaml).map_err(|source| PipelineError::MalformedMarkdown {
                    path: path.to_string(),
                    source,
                })?;
        }

        let tree = self
            .steps
            .iter()
            .fold(tree, |tree, step| step.apply(tree, &mut context));

        tracing::trace!(
            path,
            headings = context.headings.len(),
            records = context.records.len(),
            "document processed"
        );

        Ok(ProcessedDocument { tree, context })
    }
}
