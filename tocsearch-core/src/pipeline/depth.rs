//! Step 3: drop headings shallower than the configured minimum.

use super::{DocumentContext, Transform};
use crate::markdown::Node;

/// Removes heading nodes with `depth < min_depth`, wherever they appear
pub struct DepthFilter {
    min_depth: u8,
}

impl DepthFilter {
    pub fn new(min_depth: u8) -> Self {
        Self { min_depth }
    }
}

impl Transform for DepthFilter {
    fn name(&self) -> &'static str {
        "depth-filter"
    }

    fn apply(&self, mut tree: Node, _ctx: &mut DocumentContext) -> Node {
        let min_depth = self.min_depth;
        tree.retain_descendants(
            &|node: &Node| !matches!(node, Node::Heading { depth, .. } if *depth < min_depth),
        );
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownParser;

    fn depths(md: &str, min_depth: u8) -> Vec<u8> {
        let mut ctx = DocumentContext::default();
        let tree = DepthFilter::new(min_depth).apply(MarkdownParser::new().parse(md), &mut ctx);
        let mut depths = Vec::new();
        tree.walk(&mut |node| {
            if let Node::Heading { depth, .. } = node {
                depths.push(*depth);
            }
        });
        depths
    }

    #[test]
    fn test_filters_shallow_headings() {
        let md = "# 1\n\n## 2\n\n### 3\n\n#### 4\n";
        assert_eq!(depths(md, 3), vec![3, 4]);
        assert_eq!(depths(md, 1), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_keeps_surrounding_content() {
        let mut ctx = DocumentContext::default();
        let tree = DepthFilter::new(2).apply(
            MarkdownParser::new().parse("# Gone\n\nStays.\n"),
            &mut ctx,
        );
        assert_eq!(tree.text_content(), "Stays.");
    }
}
