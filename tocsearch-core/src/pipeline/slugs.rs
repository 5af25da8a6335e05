//! Step 1: assign unique anchor slugs to headings.

use super::{DocumentContext, Transform};
use crate::markdown::Node;
use crate::models::HeadingRecord;
use crate::slug::Slugger;

/// Assigns every heading a unique slug
///
/// Explicit `{#id}` attributes are kept (and reserved); other headings are
/// slugged from their text.
pub struct SlugTransformer;

impl SlugTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SlugTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for SlugTransformer {
    fn name(&self) -> &'static str {
        "slug"
    }

    fn apply(&self, mut tree: Node, ctx: &mut DocumentContext) -> Node {
        let mut slugger = Slugger::new();
        let mut headings = Vec::new();

        tree.walk_mut(&mut |node| {
            if let Node::Heading { depth, id, .. } = node {
                let depth = *depth;
                let explicit = id.take();
                let text = node.text_content();
                let slug = match explicit {
                    Some(explicit) => slugger.claim(explicit),
                    None => slugger.slug(&text),
                };
                if let Node::Heading { id, .. } = node {
                    *id = Some(slug.clone());
                }
                headings.push(HeadingRecord { depth, text, slug });
            }
        });

        ctx.headings = headings;
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownParser;

    fn slugs(md: &str) -> (Node, Vec<HeadingRecord>) {
        let mut ctx = DocumentContext::new("a", "/a");
        let tree = SlugTransformer::new().apply(MarkdownParser::new().parse(md), &mut ctx);
        (tree, ctx.headings)
    }

    #[test]
    fn test_assigns_ids() {
        let (tree, headings) = slugs("# Hello World\n\n## Getting *Started*\n");
        assert_eq!(
            headings,
            vec![
                HeadingRecord {
                    depth: 1,
                    text: "Hello World".into(),
                    slug: "hello-world".into()
                },
                HeadingRecord {
                    depth: 2,
                    text: "Getting Started".into(),
                    slug: "getting-started".into()
                },
            ]
        );
        assert!(matches!(
            &tree.children()[1],
            Node::Heading { id: Some(id), .. } if id == "getting-started"
        ));
    }

    #[test]
    fn test_duplicates_and_explicit_ids() {
        let (_, headings) = slugs("# Setup\n\n## Setup\n\n## Other {#setup}\n");
        let ids: Vec<&str> = headings.iter().map(|h| h.slug.as_str()).collect();
        assert_eq!(ids, vec!["setup", "setup-1", "setup-2"]);
    }

    #[test]
    fn test_punctuation_only_headings() {
        let (_, headings) = slugs("## !!!\n\n## ???\n");
        let ids: Vec<&str> = headings.iter().map(|h| h.slug.as_str()).collect();
        assert_eq!(ids, vec!["section", "section-1"]);
    }

    #[test]
    fn test_nested_headings_are_slugged() {
        let (_, headings) = slugs("> ## Quoted\n");
        assert_eq!(headings[0].slug, "quoted");
    }
}
