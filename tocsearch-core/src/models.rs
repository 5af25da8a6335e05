//! Content model structs for documents, link records and search results.

use serde::{Deserialize, Serialize};

/// Front matter metadata from markdown files
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Keys this crate does not interpret
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl Frontmatter {
    /// Non-blank title, if any
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Location of a document's markdown source relative to a docs root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualFile {
    /// Base directory the path is relative to (e.g. "docs")
    pub cwd: String,
    /// Path of the markdown file inside `cwd` (e.g. "guide/intro.md")
    pub path: String,
}

impl VirtualFile {
    /// Fully-qualified fetch target
    pub fn full_path(&self) -> String {
        crate::location::join(&self.cwd, &self.path)
    }
}

/// Result of fetching a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Found { contents: String },
    NotFound,
}

impl Resource {
    pub fn found(contents: impl Into<String>) -> Self {
        Resource::Found {
            contents: contents.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resource::NotFound)
    }

    pub fn contents(&self) -> Option<&str> {
        match self {
            Resource::Found { contents } => Some(contents),
            Resource::NotFound => None,
        }
    }
}

/// A fetched document awaiting processing
#[derive(Debug, Clone)]
pub struct Document {
    /// Logical page path the document was requested as
    pub logical_path: String,
    /// Where the markdown source lives
    pub file: VirtualFile,
    /// Raw markdown, or the not-found signal
    pub raw: Resource,
}

impl Document {
    pub fn new(logical_path: impl Into<String>, file: VirtualFile, raw: Resource) -> Self {
        Self {
            logical_path: logical_path.into(),
            file,
            raw,
        }
    }

    /// Page location used as the base for relative URL resolution.
    ///
    /// Always carries a leading slash so resolved URLs do not depend on the
    /// page the reader is currently on.
    pub fn page_location(&self) -> String {
        let page = self
            .logical_path
            .split(['#', '?'])
            .next()
            .unwrap_or_default();
        if page.starts_with('/') {
            page.to_string()
        } else {
            format!("/{}", page)
        }
    }
}

/// Heading seen while slugging a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRecord {
    pub depth: u8,
    pub text: String,
    pub slug: String,
}

/// Unit stored in the search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Document title, front-matter title or logical path
    pub name: String,
    /// Absolute, slug-qualified URL
    pub url: String,
    /// Flattened text of the link
    pub content: String,
    /// Source heading depth for table-of-contents links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,
}

/// A matching record whose `content` is a highlighted excerpt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub url: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,
}

impl SearchResult {
    pub(crate) fn from_record(record: &LinkRecord, excerpt: String) -> Self {
        Self {
            name: record.name.clone(),
            url: record.url.clone(),
            content: excerpt,
            depth: record.depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(path: &str) -> Document {
        Document::new(
            path,
            VirtualFile {
                cwd: "docs".into(),
                path: "x.md".into(),
            },
            Resource::NotFound,
        )
    }

    #[test]
    fn test_page_location_adds_leading_slash() {
        assert_eq!(doc("guide/intro").page_location(), "/guide/intro");
        assert_eq!(doc("/guide/intro").page_location(), "/guide/intro");
    }

    #[test]
    fn test_page_location_drops_fragment_and_query() {
        assert_eq!(doc("/guide/intro#setup").page_location(), "/guide/intro");
        assert_eq!(doc("intro?x=1").page_location(), "/intro");
    }

    #[test]
    fn test_resource_accessors() {
        let found = Resource::found("# Hi");
        assert_eq!(found.contents(), Some("# Hi"));
        assert!(!found.is_not_found());
        assert!(Resource::NotFound.is_not_found());
    }

    #[test]
    fn test_link_record_json_omits_missing_depth() {
        let record = LinkRecord {
            name: "Guide".into(),
            url: "/guide".into(),
            content: "Guide".into(),
            depth: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("depth"));
    }
}
