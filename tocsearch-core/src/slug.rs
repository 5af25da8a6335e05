//! Slug generation and per-document de-duplication.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUNS: OnceLock<Regex> = OnceLock::new();

fn hyphen_runs() -> &'static Regex {
    HYPHEN_RUNS.get_or_init(|| Regex::new(r"-+").expect("static regex"))
}

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Lowercase
/// - Replace whitespace with hyphens
/// - Remove special characters (except hyphens)
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use tocsearch_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("C++ Programming"), "c-programming");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    let cleaned = lowercased
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_whitespace() || c == '_' {
                Some("-")
            } else if c.is_ascii_alphanumeric() || c == '-' || c.is_alphabetic() {
                Some(g)
            } else {
                None
            }
        })
        .collect::<String>();

    let collapsed = hyphen_runs().replace_all(&cleaned, "-");
    collapsed.trim_matches('-').to_string()
}

const FALLBACK_SLUG: &str = "section";

/// Hands out unique slugs within one document
///
/// The first heading with a given slug keeps it; later ones get `-1`,
/// `-2`, ... appended.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text` and make the result unique
    ///
    /// Text with nothing to slug (e.g. only punctuation) falls back to
    /// `section`.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        if base.is_empty() {
            self.claim(FALLBACK_SLUG.to_string())
        } else {
            self.claim(base)
        }
    }

    /// Reserve an already-normalized slug (e.g. an explicit `{#id}`)
    pub fn claim(&mut self, base: String) -> String {
        let mut candidate = base.clone();
        while self.occurrences.contains_key(&candidate) {
            let count = self.occurrences.entry(base.clone()).or_default();
            *count += 1;
            candidate = format!("{}-{}", base, count);
        }
        self.occurrences.insert(candidate.clone(), 0);
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Rust Programming"), "rust-programming");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(slugify("Rust & Safety"), "rust-safety");
        assert_eq!(slugify("Node.js Tips"), "nodejs-tips");
        assert_eq!(slugify("What's new?"), "whats-new");
    }

    #[test]
    fn test_unicode() {
        assert_eq!(slugify("Café"), "café");
    }

    #[test]
    fn test_whitespace_and_underscores() {
        assert_eq!(slugify("  Hello    World  "), "hello-world");
        assert_eq!(slugify("hello_world"), "hello-world");
        assert_eq!(slugify("tab\tseparated"), "tab-separated");
    }

    #[test]
    fn test_empty_and_special_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugger_deduplicates() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Intro"), "intro");
        assert_eq!(slugger.slug("Intro"), "intro-1");
        assert_eq!(slugger.slug("intro"), "intro-2");
        assert_eq!(slugger.slug("Setup"), "setup");
    }

    #[test]
    fn test_slugger_never_returns_empty() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("!!!"), "section");
        assert_eq!(slugger.slug("???"), "section-1");
        assert_eq!(slugger.slug("Section"), "section-2");
    }

    #[test]
    fn test_slugger_avoids_generated_collisions() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Intro 1"), "intro-1");
        assert_eq!(slugger.slug("Intro"), "intro");
        assert_eq!(slugger.slug("Intro"), "intro-2");
    }
}
