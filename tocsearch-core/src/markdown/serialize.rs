//! Render a [`Node`] tree back to markdown text.

use super::Node;

/// Serialize a tree to markdown
///
/// Blocks are separated by blank lines; tight lists keep their items on
/// consecutive lines. The output always ends with a single newline unless
/// it is empty.
pub fn to_markdown(node: &Node) -> String {
    let mut out = match node {
        Node::Root { children } => blocks(children, "\n\n"),
        other if other.is_block() => block(other),
        other => inline(std::slice::from_ref(other)),
    };
    let trimmed = out.trim_end_matches('\n').len();
    out.truncate(trimmed);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Render a run of children, grouping consecutive inline nodes into one block
fn blocks(children: &[Node], separator: &str) -> String {
    let mut rendered = Vec::new();
    let mut run: Vec<Node> = Vec::new();

    for child in children {
        if child.is_block() {
            if !run.is_empty() {
                rendered.push(inline(&run));
                run.clear();
            }
            rendered.push(block(child));
        } else {
            run.push(child.clone());
        }
    }
    if !run.is_empty() {
        rendered.push(inline(&run));
    }

    rendered.join(separator)
}

fn block(node: &Node) -> String {
    match node {
        Node::Root { children } => blocks(children, "\n\n"),
        Node::FrontMatter { value } => format!("---\n{}\n---", value.trim_end_matches('\n')),
        Node::Heading { depth, children, .. } => {
            format!("{} {}", "#".repeat(*depth as usize), inline(children))
        }
        Node::Paragraph { children } => inline(children),
        Node::BlockQuote { children } => blocks(children, "\n\n")
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {}", line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Node::List {
            ordered,
            start,
            children,
        } => list(*ordered, start.unwrap_or(1), children),
        Node::ListItem { children } => blocks(children, "\n"),
        Node::Code { lang, value } => {
            let fence = fence_for(value, '`', 3);
            format!(
                "{fence}{}\n{}\n{fence}",
                lang.as_deref().unwrap_or_default(),
                value.trim_end_matches('\n')
            )
        }
        Node::ThematicBreak => "---".to_string(),
        other => inline(std::slice::from_ref(other)),
    }
}

fn list(ordered: bool, start: u64, items: &[Node]) -> String {
    // Paragraph children mark a loose list
    let loose = items
        .iter()
        .any(|item| item.children().iter().any(|c| matches!(c, Node::Paragraph { .. })));
    let item_separator = if loose { "\n\n" } else { "\n" };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if ordered {
                format!("{}. ", start + i as u64)
            } else {
                "- ".to_string()
            };
            let indent = " ".repeat(marker.len());
            let body = blocks(item.children(), item_separator);
            let mut lines = body.lines();
            let mut rendered = format!("{}{}", marker, lines.next().unwrap_or_default());
            for line in lines {
                rendered.push('\n');
                if !line.is_empty() {
                    rendered.push_str(&indent);
                    rendered.push_str(line);
                }
            }
            rendered.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join(item_separator)
}

fn inline(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text { value } => {
                let line_start = out.is_empty() || out.ends_with('\n');
                out.push_str(&escape(value, line_start));
            }
            Node::Emphasis { children } => {
                out.push('*');
                out.push_str(&inline(children));
                out.push('*');
            }
            Node::Strong { children } => {
                out.push_str("**");
                out.push_str(&inline(children));
                out.push_str("**");
            }
            Node::Strikethrough { children } => {
                out.push_str("~~");
                out.push_str(&inline(children));
                out.push_str("~~");
            }
            Node::InlineCode { value } => {
                let fence = fence_for(value, '`', 1);
                let pad = if value.starts_with('`') || value.ends_with('`') {
                    " "
                } else {
                    ""
                };
                out.push_str(&format!("{fence}{pad}{value}{pad}{fence}"));
            }
            Node::Break => out.push_str("\\\n"),
            Node::Html { value } => out.push_str(value.trim_end_matches('\n')),
            Node::Link {
                url,
                title,
                children,
                ..
            } => {
                out.push('[');
                out.push_str(&inline(children));
                out.push_str("](");
                out.push_str(&destination(url, title.as_deref()));
                out.push(')');
            }
            Node::Image { url, title, alt } => {
                out.push_str("![");
                out.push_str(&escape(alt, false));
                out.push_str("](");
                out.push_str(&destination(url, title.as_deref()));
                out.push(')');
            }
            other => out.push_str(&block(other)),
        }
    }
    out
}

fn destination(url: &str, title: Option<&str>) -> String {
    let url = if url.contains([' ', '(', ')']) {
        format!("<{}>", url)
    } else {
        url.to_string()
    };
    match title {
        Some(title) => format!("{} \"{}\"", url, title.replace('"', "\\\"")),
        None => url,
    }
}

/// Shortest fence of `ch` longer than any run of it inside `value`
fn fence_for(value: &str, ch: char, min: usize) -> String {
    let mut longest = 0;
    let mut current = 0;
    for c in value.chars() {
        if c == ch {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    ch.to_string().repeat(min.max(longest + 1))
}

/// Backslash-escape text so it reparses as the same literal text
///
/// Inline markup characters are always escaped. Characters that would open
/// a block (heading, list, quote, fence, setext underline) are escaped at
/// the start of a line.
fn escape(text: &str, line_start: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut line_start = line_start;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if line_start && c.is_ascii_digit() {
            // `1.` and `1)` open ordered lists
            out.push(c);
            while let Some(digit) = chars.next_if(char::is_ascii_digit) {
                out.push(digit);
            }
            if let Some(delimiter) = chars.next_if(|&d| d == '.' || d == ')') {
                out.push('\\');
                out.push(delimiter);
            }
            line_start = false;
            continue;
        }

        let inline_markup = matches!(c, '\\' | '*' | '_' | '[' | ']' | '`' | '<' | '&' | '#' | '~');
        let block_marker = line_start && matches!(c, '-' | '+' | '=' | '>');
        if inline_markup || block_marker {
            out.push('\\');
        }
        out.push(c);
        line_start = c == '\n';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownParser;

    fn round_trip(md: &str) -> String {
        to_markdown(&MarkdownParser::new().parse(md))
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(
            round_trip("# Title\n\nSome *emphasis* and **strong** text.\n"),
            "# Title\n\nSome *emphasis* and **strong** text.\n"
        );
    }

    #[test]
    fn test_tight_nested_list() {
        let md = "- [One](#one)\n  - [Two](#two)\n- [Three](#three)\n";
        assert_eq!(round_trip(md), md);
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(round_trip("3. a\n4. b\n"), "3. a\n4. b\n");
    }

    #[test]
    fn test_code_block_fence() {
        let md = "````md\n```\ninner\n```\n````\n";
        assert_eq!(round_trip(md), md);
    }

    #[test]
    fn test_front_matter_and_quote() {
        let md = "---\ntitle: Guide\n---\n\n> quoted\n>\n> more\n";
        assert_eq!(round_trip(md), md);
    }

    #[test]
    fn test_link_title_and_image() {
        assert_eq!(
            round_trip("[a](/b \"T\") ![alt](/c.png)\n"),
            "[a](/b \"T\") ![alt](/c.png)\n"
        );
    }

    #[test]
    fn test_escapes_text() {
        let root = Node::root(vec![Node::Paragraph {
            children: vec![Node::text("snake_case [x]")],
        }]);
        assert_eq!(to_markdown(&root), "snake\\_case \\[x\\]\n");
    }

    #[test]
    fn test_block_markers_in_text_reparse_as_text() {
        let parser = MarkdownParser::new();
        for md in [
            "\\# not a heading\n\n1\\. not a list\n\n\\- nor this\n",
            "\\> not a quote\n\n\\+ plus\n\n2\\) paren\n",
            "line one\n\\=\\=\\=\n\nline two\n\\---\n",
            "C\\# and \\~\\~no strike\\~\\~ or \\<b\\> tags & entities\n",
            "- \\# item\n- 3\\. item\n",
            "# Title \\#\n",
        ] {
            let tree = parser.parse(md);
            let reparsed = parser.parse(&to_markdown(&tree));
            assert_eq!(reparsed, tree, "round trip of {:?}", md);
        }
    }

    #[test]
    fn test_escapes_line_leading_markers() {
        let root = Node::root(vec![Node::Paragraph {
            children: vec![Node::text("# one\n10. two\n- three")],
        }]);
        assert_eq!(to_markdown(&root), "\\# one\n10\\. two\n\\- three\n");
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(to_markdown(&Node::root(Vec::new())), "");
    }
}
