//! Inline recognition: bold, italic, inline code, autolinks, links/images,
//! math, footnote references, and wiki-links. Invoked lazily per block —
//! most callers only need block-level spans; section extraction and
//! chunking never need the inline runs.

use regex::Regex;
use std::sync::OnceLock;

/// A single inline span recognized within a block's text.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineSpan {
    Bold(String),
    Italic(String),
    Code(String),
    Autolink(String),
    Link { text: String, target: String },
    Image { alt: String, target: String },
    MathInline(String),
    MathDisplay(String),
    FootnoteRef(String),
    WikiLink { target: String, label: Option<String> },
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").unwrap())
}

fn italic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:[^*]|^)\*([^*]+)\*(?:[^*]|$)|\b_([^_]+)_\b").unwrap())
}

fn code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").unwrap())
}

fn autolink_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<(https?://[^\s>]+)>").unwrap())
}

fn image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)(?:\s+\x22[^\x22]*\x22)?\)").unwrap())
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)(?:\s+\x22[^\x22]*\x22)?\)").unwrap())
}

fn math_display_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\$\$(.+?)\$\$").unwrap())
}

fn math_inline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$([^\$\n]+)\$").unwrap())
}

fn footnote_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\^([^\]]+)\]").unwrap())
}

fn wiki_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\[([^\]|]+?)(?:\|([^\]]+))?\]\]").unwrap())
}

/// Scan `text` for every recognized inline span, in source order.
///
/// Spans are found independently per pattern rather than via a single
/// tokenizing pass; overlapping matches (e.g. a footnote ref inside a math
/// span) are not de-duplicated, matching the original's regex-per-feature
/// approach in `plugin.py`.
pub fn scan_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();

    for caps in math_display_re().captures_iter(text) {
        spans.push(InlineSpan::MathDisplay(caps[1].trim().to_string()));
    }
    let text_no_display: String = math_display_re().replace_all(text, "").into_owned();

    for caps in wiki_link_re().captures_iter(text) {
        let target = caps[1].trim().to_string();
        let label = caps.get(2).map(|m| m.as_str().trim().to_string());
        spans.push(InlineSpan::WikiLink { target, label });
    }

    for caps in image_re().captures_iter(text) {
        spans.push(InlineSpan::Image {
            alt: caps[1].to_string(),
            target: caps[2].to_string(),
        });
    }

    let text_no_images: String = image_re().replace_all(text, "").into_owned();
    for caps in link_re().captures_iter(&text_no_images) {
        spans.push(InlineSpan::Link {
            text: caps[1].to_string(),
            target: caps[2].to_string(),
        });
    }

    for caps in autolink_re().captures_iter(text) {
        spans.push(InlineSpan::Autolink(caps[1].to_string()));
    }

    for caps in code_re().captures_iter(text) {
        spans.push(InlineSpan::Code(caps[1].to_string()));
    }

    for caps in bold_re().captures_iter(text) {
        let value = caps.get(1).or_else(|| caps.get(2)).unwrap().as_str();
        spans.push(InlineSpan::Bold(value.to_string()));
    }

    for caps in italic_re().captures_iter(text) {
        if let Some(value) = caps.get(1).or_else(|| caps.get(2)) {
            spans.push(InlineSpan::Italic(value.as_str().to_string()));
        }
    }

    for caps in math_inline_re().captures_iter(&text_no_display) {
        spans.push(InlineSpan::MathInline(caps[1].trim().to_string()));
    }

    for caps in footnote_ref_re().captures_iter(text) {
        // A footnote reference never starts with `^id]:` (that's a
        // definition, handled at block level); `\[\^id\]` alone is a ref.
        spans.push(InlineSpan::FootnoteRef(caps[1].to_string()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_bold_and_italic() {
        let spans = scan_inline("a **bold** and *italic* word");
        assert!(spans.contains(&InlineSpan::Bold("bold".to_string())));
        assert!(spans.contains(&InlineSpan::Italic("italic".to_string())));
    }

    #[test]
    fn recognizes_inline_code_and_autolink() {
        let spans = scan_inline("see `foo()` at <https://example.com/x>");
        assert!(spans.contains(&InlineSpan::Code("foo()".to_string())));
        assert!(spans.contains(&InlineSpan::Autolink("https://example.com/x".to_string())));
    }

    #[test]
    fn recognizes_link_and_image() {
        let spans = scan_inline("![alt](img.png) and [text](https://x.com)");
        assert!(spans.contains(&InlineSpan::Image {
            alt: "alt".to_string(),
            target: "img.png".to_string(),
        }));
        assert!(spans.contains(&InlineSpan::Link {
            text: "text".to_string(),
            target: "https://x.com".to_string(),
        }));
    }

    #[test]
    fn recognizes_math_inline_and_display() {
        let spans = scan_inline("inline $x^2$ and display $$\\int f$$");
        assert!(spans.contains(&InlineSpan::MathInline("x^2".to_string())));
        assert!(spans.contains(&InlineSpan::MathDisplay("\\int f".to_string())));
    }

    #[test]
    fn recognizes_footnote_ref_and_wiki_link() {
        let spans = scan_inline("see[^1] and [[Target Page|label]]");
        assert!(spans.contains(&InlineSpan::FootnoteRef("1".to_string())));
        assert!(spans.contains(&InlineSpan::WikiLink {
            target: "Target Page".to_string(),
            label: Some("label".to_string()),
        }));
    }

    #[test]
    fn wiki_link_without_label() {
        let spans = scan_inline("[[Home]]");
        assert!(spans.contains(&InlineSpan::WikiLink {
            target: "Home".to_string(),
            label: None,
        }));
    }
}
