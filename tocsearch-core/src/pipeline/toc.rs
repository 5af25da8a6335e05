//! Step 4: replace the document body with a table of contents.

use super::{DocumentContext, Transform};
use crate::markdown::Node;
use crate::slug::slugify;

/// Heading that made it into the table of contents
#[derive(Debug, Clone)]
struct TocEntry {
    depth: u8,
    slug: String,
    children: Vec<Node>,
}

/// Nested list item under construction; intermediate items for skipped
/// depths carry no link
#[derive(Debug, Default)]
struct TocItem {
    entry: Option<TocEntry>,
    children: Vec<TocItem>,
}

/// Replaces everything from the first qualifying heading onward with a
/// nested list of links to the document's headings
///
/// Only top-level, non-empty headings with `depth <= max_depth` qualify.
/// Content before the first qualifying heading is kept. A document without
/// qualifying headings is left untouched.
pub struct TocTransformer {
    max_depth: u8,
}

impl TocTransformer {
    pub fn new(max_depth: u8) -> Self {
        Self { max_depth }
    }

    fn entries(&self, children: &[Node]) -> (Option<usize>, Vec<TocEntry>) {
        let mut first = None;
        let mut entries = Vec::new();

        for (position, child) in children.iter().enumerate() {
            let Node::Heading {
                depth,
                id,
                children,
            } = child
            else {
                continue;
            };
            let text = child.text_content();
            if *depth > self.max_depth || text.trim().is_empty() {
                continue;
            }

            first.get_or_insert(position);
            entries.push(TocEntry {
                depth: *depth,
                slug: id.clone().unwrap_or_else(|| slugify(&text)),
                children: unwrap_links(children.clone()),
            });
        }

        (first, entries)
    }
}

impl Transform for TocTransformer {
    fn name(&self) -> &'static str {
        "toc"
    }

    fn apply(&self, tree: Node, _ctx: &mut DocumentContext) -> Node {
        let mut children = match tree {
            Node::Root { children } => children,
            other => return other,
        };

        let (first, entries) = self.entries(&children);
        let Some(first) = first else {
            return Node::Root { children };
        };

        children.truncate(first);
        children.push(build_list(entries));
        Node::Root { children }
    }
}

/// Replace links with their content so a TOC link never nests another
fn unwrap_links(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Link { children, .. } => out.extend(unwrap_links(children)),
            mut other => {
                if let Some(children) = other.children_mut() {
                    *children = unwrap_links(std::mem::take(children));
                }
                out.push(other);
            }
        }
    }
    out
}

fn build_list(entries: Vec<TocEntry>) -> Node {
    let shallowest = entries.iter().map(|e| e.depth).min().unwrap_or(1);
    let mut items = Vec::new();
    for entry in entries {
        let relative = entry.depth - shallowest + 1;
        insert(&mut items, entry, relative);
    }
    list_node(items)
}

fn insert(items: &mut Vec<TocItem>, entry: TocEntry, relative_depth: u8) {
    if relative_depth <= 1 {
        items.push(TocItem {
            entry: Some(entry),
            children: Vec::new(),
        });
        return;
    }

    if items.is_empty() {
        items.push(TocItem::default());
    }
    if let Some(last) = items.last_mut() {
        insert(&mut last.children, entry, relative_depth - 1);
    }
}

fn list_node(items: Vec<TocItem>) -> Node {
    let children = items
        .into_iter()
        .map(|item| {
            let mut children = Vec::new();
            if let Some(entry) = item.entry {
                children.push(Node::Link {
                    url: format!("#{}", entry.slug),
                    title: None,
                    depth: Some(entry.depth),
                    children: entry.children,
                });
            }
            if !item.children.is_empty() {
                children.push(list_node(item.children));
            }
            Node::ListItem { children }
        })
        .collect();

    Node::List {
        ordered: false,
        start: None,
        children,
    }
}
