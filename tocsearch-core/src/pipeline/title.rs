//! Step 2: extract the document title.

use super::{DocumentContext, Transform};
use crate::markdown::Node;

/// Records the text of the first depth-1 heading as the document title
pub struct TitleTransformer;

impl TitleTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TitleTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for TitleTransformer {
    fn name(&self) -> &'static str {
        "title"
    }

    fn apply(&self, tree: Node, ctx: &mut DocumentContext) -> Node {
        if ctx.title.is_none() {
            let mut title = None;
            tree.walk(&mut |node| {
                if title.is_none() && matches!(node, Node::Heading { depth: 1, .. }) {
                    title = Some(node.text_content());
                }
            });
            ctx.title = title;
        }
        tree
    }
}
