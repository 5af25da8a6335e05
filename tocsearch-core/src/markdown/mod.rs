//! Markdown syntax tree, parser glue and serializer.

pub mod serialize;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

pub use serialize::to_markdown;

/// Markdown syntax tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Root {
        children: Vec<Node>,
    },
    /// Raw YAML between the `---` fences
    FrontMatter {
        value: String,
    },
    Heading {
        depth: u8,
        /// Anchor id, explicit (`{#id}`) or assigned by slugging
        id: Option<String>,
        children: Vec<Node>,
    },
    Paragraph {
        children: Vec<Node>,
    },
    BlockQuote {
        children: Vec<Node>,
    },
    List {
        ordered: bool,
        start: Option<u64>,
        children: Vec<Node>,
    },
    ListItem {
        children: Vec<Node>,
    },
    Code {
        lang: Option<String>,
        value: String,
    },
    Html {
        value: String,
    },
    ThematicBreak,
    Text {
        value: String,
    },
    Emphasis {
        children: Vec<Node>,
    },
    Strong {
        children: Vec<Node>,
    },
    Strikethrough {
        children: Vec<Node>,
    },
    InlineCode {
        value: String,
    },
    Break,
    Link {
        url: String,
        title: Option<String>,
        /// Depth of the heading a table-of-contents link points at
        depth: Option<u8>,
        children: Vec<Node>,
    },
    Image {
        url: String,
        title: Option<String>,
        alt: String,
    },
}

impl Node {
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root { children }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root { children }
            | Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::BlockQuote { children }
            | Node::List { children, .. }
            | Node::ListItem { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Strikethrough { children }
            | Node::Link { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root { children }
            | Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::BlockQuote { children }
            | Node::List { children, .. }
            | Node::ListItem { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Strikethrough { children }
            | Node::Link { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Whether the node is block-level (rendered on its own lines)
    pub fn is_block(&self) -> bool {
        match self {
            Node::Root { .. }
            | Node::FrontMatter { .. }
            | Node::Heading { .. }
            | Node::Paragraph { .. }
            | Node::BlockQuote { .. }
            | Node::List { .. }
            | Node::ListItem { .. }
            | Node::Code { .. }
            | Node::ThematicBreak => true,
            // HTML blocks keep their trailing newline, inline HTML does not
            Node::Html { value } => value.ends_with('\n'),
            _ => false,
        }
    }

    /// Flattened plain text of the subtree
    ///
    /// Images contribute their alt text; HTML and front matter contribute
    /// nothing.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Text { value } | Node::InlineCode { value } | Node::Code { value, .. } => {
                out.push_str(value)
            }
            Node::Image { alt, .. } => out.push_str(alt),
            Node::Html { .. } | Node::FrontMatter { .. } => {}
            other => {
                for child in other.children() {
                    child.push_text(out);
                }
            }
        }
    }

    /// Visit the subtree in pre-order
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Visit the subtree in pre-order with mutable access
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Node)) {
        visit(self);
        if let Some(children) = self.children_mut() {
            for child in children.iter_mut() {
                child.walk_mut(visit);
            }
        }
    }

    /// Drop every descendant matching `predicate`, at any depth
    pub fn retain_descendants(&mut self, predicate: &impl Fn(&Node) -> bool) {
        if let Some(children) = self.children_mut() {
            children.retain(|child| predicate(child));
            for child in children.iter_mut() {
                child.retain_descendants(predicate);
            }
        }
    }

    /// Raw YAML of the document's front matter block, if present
    pub fn front_matter(&self) -> Option<&str> {
        self.children().iter().find_map(|child| match child {
            Node::FrontMatter { value } => Some(value.as_str()),
            _ => None,
        })
    }
}

/// Open container while folding parser events into a tree
enum Frame {
    Root,
    Paragraph,
    Heading { depth: u8, id: Option<String> },
    BlockQuote,
    List { ordered: bool, start: Option<u64> },
    Item,
    CodeBlock { lang: Option<String> },
    HtmlBlock,
    Emphasis,
    Strong,
    Strikethrough,
    Link { url: String, title: Option<String> },
    Image { url: String, title: Option<String> },
    MetadataBlock,
    /// Constructs outside the node set; children are spliced into the parent
    Transparent,
}

impl Frame {
    fn from_tag(tag: Tag<'_>) -> Self {
        match tag {
            Tag::Paragraph => Frame::Paragraph,
            Tag::Heading { level, id, .. } => Frame::Heading {
                depth: level as u8,
                id: id.map(|id| id.to_string()),
            },
            Tag::BlockQuote(_) => Frame::BlockQuote,
            Tag::List(start) => Frame::List {
                ordered: start.is_some(),
                start,
            },
            Tag::Item => Frame::Item,
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                lang: match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                },
            },
            Tag::HtmlBlock => Frame::HtmlBlock,
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Strikethrough => Frame::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                url: dest_url.to_string(),
                title: non_empty(title.to_string()),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                url: dest_url.to_string(),
                title: non_empty(title.to_string()),
            },
            Tag::MetadataBlock(_) => Frame::MetadataBlock,
            _ => Frame::Transparent,
        }
    }

    /// Close the frame; `Err` hands the children back for splicing
    fn finish(self, children: Vec<Node>) -> Result<Node, Vec<Node>> {
        let node = match self {
            Frame::Root => Node::Root { children },
            Frame::Paragraph => Node::Paragraph { children },
            Frame::Heading { depth, id } => Node::Heading {
                depth,
                id,
                children,
            },
            Frame::BlockQuote => Node::BlockQuote { children },
            Frame::List { ordered, start } => Node::List {
                ordered,
                start,
                children,
            },
            Frame::Item => Node::ListItem { children },
            Frame::CodeBlock { lang } => Node::Code {
                lang,
                value: concat_values(&children),
            },
            Frame::HtmlBlock => Node::Html {
                value: concat_values(&children),
            },
            Frame::Emphasis => Node::Emphasis { children },
            Frame::Strong => Node::Strong { children },
            Frame::Strikethrough => Node::Strikethrough { children },
            Frame::Link { url, title } => Node::Link {
                url,
                title,
                depth: None,
                children,
            },
            Frame::Image { url, title } => Node::Image {
                url,
                title,
                alt: Node::root(children).text_content(),
            },
            Frame::MetadataBlock => Node::FrontMatter {
                value: concat_values(&children),
            },
            Frame::Transparent => return Err(children),
        };
        Ok(node)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn concat_values(children: &[Node]) -> String {
    children
        .iter()
        .map(|child| match child {
            Node::Text { value } | Node::Html { value } => value.as_str(),
            _ => "",
        })
        .collect()
}

/// Append a child, merging adjacent text runs
fn push_child(children: &mut Vec<Node>, node: Node) {
    if let Node::Text { value } = &node {
        if let Some(Node::Text { value: last }) = children.last_mut() {
            last.push_str(value);
            return;
        }
    }
    children.push(node);
}

/// Markdown parser producing [`Node`] trees
pub struct MarkdownParser {
    options: Options,
}

impl MarkdownParser {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        Self { options }
    }

    /// Parse markdown text into a `Root` node
    pub fn parse(&self, markdown: &str) -> Node {
        let mut stack: Vec<(Frame, Vec<Node>)> = vec![(Frame::Root, Vec::new())];

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(tag) => stack.push((Frame::from_tag(tag), Vec::new())),
                Event::End(_) => {
                    // The root frame is never closed by an event
                    if stack.len() < 2 {
                        continue;
                    }
                    let Some((frame, children)) = stack.pop() else {
                        continue;
                    };
                    let Some((_, parent)) = stack.last_mut() else {
                        continue;
                    };
                    match frame.finish(children) {
                        Ok(node) => push_child(parent, node),
                        Err(spliced) => {
                            for node in spliced {
                                push_child(parent, node);
                            }
                        }
                    }
                }
                other => {
                    let node = match other {
                        Event::Text(text) => Node::text(text.to_string()),
                        Event::Code(code) => Node::InlineCode {
                            value: code.to_string(),
                        },
                        Event::Html(html) | Event::InlineHtml(html) => Node::Html {
                            value: html.to_string(),
                        },
                        Event::SoftBreak => Node::text("\n"),
                        Event::HardBreak => Node::Break,
                        Event::Rule => Node::ThematicBreak,
                        _ => continue,
                    };
                    if let Some((_, children)) = stack.last_mut() {
                        push_child(children, node);
                    }
                }
            }
        }

        // Unbalanced input cannot happen with pulldown-cmark, but fold any
        // leftovers into the root rather than dropping them.
        while stack.len() > 1 {
            if let Some((frame, children)) = stack.pop() {
                if let Some((_, parent)) = stack.last_mut() {
                    match frame.finish(children) {
                        Ok(node) => parent.push(node),
                        Err(spliced) => parent.extend(spliced),
                    }
                }
            }
        }

        let children = stack.pop().map(|(_, children)| children).unwrap_or_default();
        Node::root(children)
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(md: &str) -> Node {
        MarkdownParser::new().parse(md)
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let root = parse("# Hello World\n\nThis is **bold** text.");
        let children = root.children();
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], Node::Heading { depth: 1, .. }));
        assert_eq!(children[0].text_content(), "Hello World");
        assert_eq!(children[1].text_content(), "This is bold text.");
    }

    #[test]
    fn test_front_matter_block() {
        let root = parse("---\ntitle: Guide\n---\n\n# Intro\n");
        assert_eq!(root.front_matter().map(str::trim), Some("title: Guide"));
        assert!(matches!(root.children()[1], Node::Heading { .. }));
    }

    #[test]
    fn test_explicit_heading_id() {
        let root = parse("## Setup {#install}\n");
        match &root.children()[0] {
            Node::Heading { depth, id, .. } => {
                assert_eq!(*depth, 2);
                assert_eq!(id.as_deref(), Some("install"));
            }
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn test_links_and_images() {
        let root = parse("See [the *guide*](guide.md \"Guide\") and ![logo](img/logo.png).");
        let mut links = Vec::new();
        root.walk(&mut |node| match node {
            Node::Link { url, title, .. } => links.push((url.clone(), title.clone())),
            Node::Image { url, alt, .. } => links.push((url.clone(), Some(alt.clone()))),
            _ => {}
        });
        assert_eq!(
            links,
            vec![
                ("guide.md".to_string(), Some("Guide".to_string())),
                ("img/logo.png".to_string(), Some("logo".to_string())),
            ]
        );
    }

    #[test]
    fn test_link_text_content() {
        let root = parse("[a `b` *c*](x)");
        let mut content = String::new();
        root.walk(&mut |node| {
            if let Node::Link { .. } = node {
                content = node.text_content();
            }
        });
        assert_eq!(content, "a b c");
    }

    #[test]
    fn test_soft_breaks_merge_into_text() {
        let root = parse("one\ntwo");
        match &root.children()[0] {
            Node::Paragraph { children } => {
                assert_eq!(children, &vec![Node::text("one\ntwo")]);
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_code_block() {
        let root = parse("```rust\nfn main() {}\n```\n");
        assert_eq!(
            root.children()[0],
            Node::Code {
                lang: Some("rust".into()),
                value: "fn main() {}\n".into(),
            }
        );
    }

    #[test]
    fn test_nested_list() {
        let root = parse("- one\n  - two\n- three\n");
        match &root.children()[0] {
            Node::List {
                ordered, children, ..
            } => {
                assert!(!ordered);
                assert_eq!(children.len(), 2);
                assert!(matches!(children[0].children()[1], Node::List { .. }));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_retain_descendants() {
        let mut root = parse("> # Quoted\n\n# Top\n\ntext\n");
        root.retain_descendants(&|node: &Node| !matches!(node, Node::Heading { .. }));
        let mut headings = 0;
        root.walk(&mut |node| {
            if matches!(node, Node::Heading { .. }) {
                headings += 1;
            }
        });
        assert_eq!(headings, 0);
        assert_eq!(root.text_content(), "text");
    }
}
