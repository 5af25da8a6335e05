//! Step 6: collect every link into a flat list of search records.

use super::{DocumentContext, Transform};
use crate::markdown::Node;
use crate::models::LinkRecord;

/// Records each link in document order as a [`LinkRecord`]
///
/// The record name is resolved here rather than when the title is
/// extracted, since the links-only pipeline never extracts one.
pub struct LinkHarvester;

impl LinkHarvester {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinkHarvester {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for LinkHarvester {
    fn name(&self) -> &'static str {
        "harvest-links"
    }

    fn apply(&self, tree: Node, ctx: &mut DocumentContext) -> Node {
        let name = ctx.name();
        let mut records = Vec::new();

        tree.walk(&mut |node| {
            if let Node::Link { url, depth, .. } = node {
                records.push(LinkRecord {
                    name: name.clone(),
                    url: url.clone(),
                    content: node.text_content(),
                    depth: *depth,
                });
            }
        });

        ctx.records.extend(records);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownParser;

    #[test]
    fn test_harvests_in_document_order() {
        let mut ctx = DocumentContext::new("notes", "/notes");
        let tree = MarkdownParser::new().parse("[One](1.md)\n\n> [Two **bold**](2.md)\n");
        LinkHarvester::new().apply(tree, &mut ctx);

        assert_eq!(
            ctx.records,
            vec![
                LinkRecord {
                    name: "notes".into(),
                    url: "1.md".into(),
                    content: "One".into(),
                    depth: None,
                },
                LinkRecord {
                    name: "notes".into(),
                    url: "2.md".into(),
                    content: "Two bold".into(),
                    depth: None,
                },
            ]
        );
    }

    #[test]
    fn test_images_are_not_records() {
        let mut ctx = DocumentContext::new("notes", "/notes");
        let tree = MarkdownParser::new().parse("![img](x.png)");
        LinkHarvester::new().apply(tree, &mut ctx);
        assert!(ctx.records.is_empty());
    }
}
