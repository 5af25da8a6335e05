//! Step 5: resolve relative link and image URLs against the page location.

use super::{DocumentContext, Transform};
use crate::location::normalize;
use crate::markdown::Node;
use regex::Regex;
use std::sync::OnceLock;

static SCHEME: OnceLock<Regex> = OnceLock::new();

fn scheme_regex() -> &'static Regex {
    SCHEME.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:").expect("static regex"))
}

/// Resolve `url` against a page location such as `/guide/intro`
///
/// - URLs with a scheme (`https:`, `mailto:`), protocol-relative URLs and
///   root-absolute paths are returned unchanged
/// - fragment-only URLs attach to the page itself
/// - anything else is resolved against the page's directory
///
/// ```
/// use tocsearch_core::pipeline::resolve_url;
///
/// assert_eq!(resolve_url("/guide/intro", "#setup"), "/guide/intro#setup");
/// assert_eq!(resolve_url("/guide/intro", "../api.md#x"), "/api.md#x");
/// assert_eq!(resolve_url("/guide/intro", "https://x.dev"), "https://x.dev");
/// ```
pub fn resolve_url(location: &str, url: &str) -> String {
    if url.is_empty() || url.starts_with('/') || scheme_regex().is_match(url) {
        return url.to_string();
    }

    if url.starts_with('#') {
        return format!("{}{}", location, url);
    }

    let split = url.find(['?', '#']).unwrap_or(url.len());
    let (path, suffix) = url.split_at(split);

    let directory = match location.rfind('/') {
        Some(i) => &location[..=i],
        None => "/",
    };
    let mut resolved = normalize(&format!("{}{}", directory, path));
    if !resolved.starts_with('/') {
        resolved.insert(0, '/');
    }
    resolved.push_str(suffix);
    resolved
}

/// Rewrites relative link and image URLs to absolute ones
pub struct UrlResolver;

impl UrlResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for UrlResolver {
    fn name(&self) -> &'static str {
        "resolve-urls"
    }

    fn apply(&self, mut tree: Node, ctx: &mut DocumentContext) -> Node {
        let location = ctx.location.as_str();
        tree.walk_mut(&mut |node| match node {
            Node::Link { url, .. } | Node::Image { url, .. } => {
                *url = resolve_url(location, url);
            }
            _ => {}
        });
        tree
    }
}
