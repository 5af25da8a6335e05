//! Mapping logical page paths to markdown files, and path joining.

use crate::models::VirtualFile;

/// Resolves a logical page path to the file that holds its markdown
pub trait LocationResolver: Send + Sync {
    fn page_to_file(&self, page: &str) -> VirtualFile;
}

/// Resolver for a directory of markdown files
///
/// - `/guide/intro` maps to `guide/intro.md`
/// - `/guide/` and the empty path map to `README.md` in that directory
/// - paths already ending in `.md` are kept as-is
/// - query strings and fragments are ignored
#[derive(Debug, Clone)]
pub struct DocsLocation {
    root: String,
}

impl DocsLocation {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &str {
        &self.root
    }
}

impl Default for DocsLocation {
    fn default() -> Self {
        Self::new("docs")
    }
}

impl LocationResolver for DocsLocation {
    fn page_to_file(&self, page: &str) -> VirtualFile {
        let page = page.split(['#', '?']).next().unwrap_or_default().trim();
        let page = page.trim_start_matches('/');

        let path = if page.is_empty() || page.ends_with('/') {
            format!("{}README.md", page)
        } else if page.ends_with(".md") {
            page.to_string()
        } else {
            format!("{}.md", page)
        };

        VirtualFile {
            cwd: self.root.clone(),
            path: normalize(&path),
        }
    }
}

/// Join two path fragments with a single slash and normalize the result
///
/// `.` segments are dropped and `..` pops the previous segment (never past
/// the start). A leading slash on `base` is preserved.
///
/// ```
/// use tocsearch_core::location::join;
///
/// assert_eq!(join("docs", "guide/intro.md"), "docs/guide/intro.md");
/// assert_eq!(join("docs/", "/guide/../README.md"), "docs/README.md");
/// assert_eq!(join("/a/b", "../c"), "/a/c");
/// ```
pub fn join(base: &str, relative: &str) -> String {
    if base.is_empty() {
        return normalize(relative);
    }
    if relative.is_empty() {
        return normalize(base);
    }
    normalize(&format!(
        "{}/{}",
        base.trim_end_matches('/'),
        relative.trim_start_matches('/')
    ))
}

/// Collapse `.`, `..` and duplicate slashes in a slash-separated path
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let trailing = path.len() > 1 && path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut out = segments.join("/");
    if absolute {
        out.insert(0, '/');
    }
    if trailing && !out.ends_with('/') {
        out.push('/');
    }
    out
}
